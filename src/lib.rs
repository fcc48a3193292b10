// ABOUTME: Main library entry point for the LiftShare API server
// ABOUTME: Workout logging, feed publishing, and challenge progress over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `LiftShare` Server
//!
//! Backend of a social training app. Users log workouts made of exercises and
//! sets, publish them to the feed, and take part in challenges whose progress
//! advances automatically when a workout is published.
//!
//! ## Architecture
//!
//! - **routes**: axum handlers, one route group per domain
//! - **challenges**: publish orchestrator, metrics calculator, progress rules
//! - **database**: `SQLite` schema and managers
//! - **auth** / **middleware**: bearer token identity, CORS, request tracing
//! - **config** / **logging**: environment driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftshare_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("LiftShare API configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT issuing and validation
pub mod auth;

/// Workout publish flow and challenge progress engine
pub mod challenges;

/// Environment configuration
pub mod config;

/// `SQLite` storage
pub mod database;

/// Structured logging setup
pub mod logging;

/// Authentication, CORS, and request tracing middleware
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

pub use liftshare_core::{constants, errors, models};
