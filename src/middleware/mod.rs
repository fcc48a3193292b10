// ABOUTME: HTTP middleware for authentication, CORS, and request tracing
// ABOUTME: Shared by every route group of the LiftShare API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bearer token authentication
pub mod auth;
/// CORS configuration
pub mod cors;
/// Request IDs and request spans
pub mod tracing;

pub use auth::AuthMiddleware;
pub use cors::setup_cors;
pub use self::tracing::{with_request_tracing, RequestSpan, REQUEST_ID_HEADER};
