// ABOUTME: Route module organization for LiftShare HTTP endpoints
// ABOUTME: Route groups by domain plus the shared authentication and path helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the `LiftShare` API
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to the database managers and the challenge engine.

/// Challenge summary and membership routes
pub mod challenges;
/// Health check routes
pub mod health;
/// Workout logging and publishing routes
pub mod workouts;

pub use challenges::ChallengeRoutes;
pub use health::HealthRoutes;
pub use workouts::WorkoutRoutes;

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use uuid::Uuid;

use crate::auth::AuthResult;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Resolve the caller from the `Authorization` header
pub(crate) async fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<AuthResult> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    resources
        .auth_middleware
        .authenticate_request(auth_header)
        .await
}

/// Parse a UUID path segment
pub(crate) fn parse_path_id(id: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_input(format!("Invalid {resource} ID format")))
}
