// ABOUTME: Identity resolver turning an Authorization header into an authenticated user
// ABOUTME: Distinguishes missing credentials, invalid tokens, and deleted users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{AuthManager, AuthResult};
use crate::database::{Database, UserManager};
use crate::errors::{AppError, AppResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Request authentication middleware
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Resolve the caller from an `Authorization: Bearer <token>` header value
    ///
    /// # Errors
    ///
    /// - `unauthenticated` if the header is missing or not a bearer credential
    /// - `invalid_token` if the token fails verification or has expired
    /// - `user_not_found` if the token subject has no user row
    /// - a database error if the user lookup fails
    #[tracing::instrument(
        skip(self, auth_header),
        fields(user_id = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let Some(token) = auth_header.and_then(|h| h.strip_prefix(BEARER_PREFIX)) else {
            tracing::Span::current().record("success", false);
            tracing::debug!("Authentication failed: missing bearer credential");
            return Err(AppError::auth_required());
        };

        let claims = self.auth_manager.validate_token(token.trim()).map_err(|e| {
            tracing::Span::current().record("success", false);
            AppError::auth_invalid(e.to_string())
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::Span::current().record("success", false);
            AppError::auth_invalid("Token subject is not a user ID")
        })?;

        let user = UserManager::new(self.database.pool().clone())
            .get_user(user_id)
            .await?
            .ok_or_else(|| {
                tracing::Span::current().record("success", false);
                tracing::warn!(%user_id, "Authentication failed: user no longer exists");
                AppError::user_not_found(user_id.to_string())
            })?;

        tracing::Span::current()
            .record("user_id", user_id.to_string())
            .record("success", true);
        Ok(AuthResult { user_id, user })
    }
}
