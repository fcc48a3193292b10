// ABOUTME: Unified error type, error codes, and JSON error body for the LiftShare API
// ABOUTME: Maps domain failures onto HTTP status codes and stable snake_case wire keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the server returns [`AppResult`]. Errors carry an
//! [`ErrorCode`] that decides both the HTTP status and the `error` key written
//! into the response body:
//!
//! ```json
//! { "error": "not_found", "message": "Challenge 7f0c... not found" }
//! ```
//!
//! Endpoints that must report a fixed key for server-side failures (for example
//! `publish_metrics_failed`) attach it with [`AppError::with_failure_key`]. The
//! key only replaces the code for 5xx errors, so authentication and validation
//! failures keep their own keys.

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// No bearer credential was supplied
    #[serde(rename = "unauthenticated")]
    AuthRequired = 1000,
    /// Credential could not be verified (bad signature, expired, malformed)
    #[serde(rename = "invalid_token")]
    AuthInvalid = 1001,
    /// Credential is valid but its subject no longer exists
    UserNotFound = 1002,

    // Validation (3000-3999)
    /// Generic invalid input
    InvalidInput = 3000,
    /// A required field is missing from the request
    MissingRequiredField = 3001,
    /// A numeric field is outside its accepted range
    ValueOutOfRange = 3003,

    // Resources (4000-4999)
    /// Referenced resource does not exist
    #[serde(rename = "not_found")]
    ResourceNotFound = 4000,

    // Configuration (6000-6999)
    /// Configuration could not be loaded or is invalid
    ConfigError = 6000,

    // Internal (9000-9999)
    /// Unclassified server-side failure
    InternalError = 9000,
    /// Store query or transaction failure
    DatabaseError = 9001,
    /// JSON encoding or decoding failure
    SerializationError = 9003,
}

impl ErrorCode {
    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange => 400,
            Self::AuthRequired | Self::AuthInvalid | Self::UserNotFound => 401,
            Self::ResourceNotFound => 404,
            Self::ConfigError
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => 500,
        }
    }

    /// Stable key written into the `error` field of JSON error bodies
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "unauthenticated",
            Self::AuthInvalid => "invalid_token",
            Self::UserNotFound => "user_not_found",
            Self::InvalidInput => "invalid_input",
            Self::MissingRequiredField => "missing_required_field",
            Self::ValueOutOfRange => "value_out_of_range",
            Self::ResourceNotFound => "not_found",
            Self::ConfigError => "config_error",
            Self::InternalError => "internal_error",
            Self::DatabaseError => "database_error",
            Self::SerializationError => "serialization_error",
        }
    }

    /// Human-readable description of this error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication token is invalid",
            Self::UserNotFound => "The authenticated user no longer exists",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this code represents a server-side failure (5xx)
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.http_status() >= 500
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
#[error("{}: {message}", .code.description())]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Endpoint-specific key reported instead of the code for 5xx failures
    pub failure_key: Option<&'static str>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            failure_key: None,
            source: None,
        }
    }

    /// Attach the key an endpoint reports for server-side failures
    #[must_use]
    pub fn with_failure_key(mut self, key: &'static str) -> Self {
        if self.code.is_server_error() {
            self.failure_key = Some(key);
        }
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Key written into the `error` field of the response body
    #[must_use]
    pub fn error_key(&self) -> &'static str {
        self.failure_key.unwrap_or_else(|| self.code.as_str())
    }
}

/// Convenience constructors for common errors
impl AppError {
    /// No credential supplied
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Invalid credential
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Credential subject missing from the user store
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UserNotFound,
            format!("User {} not found", user_id.into()),
        )
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Numeric value outside its accepted range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// JSON error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error key (`not_found`, `invalid_token`, `publish_metrics_failed`, ...)
    pub error: String,
    /// Human-readable detail
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.error_key().to_owned(),
            message: error.message.clone(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("JSON processing failed: {error}"),
        )
        .with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(format!("Database operation failed: {error}")).with_source(error)
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error.key = self.error_key(), error = %self, "Request failed");
        }
        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}
