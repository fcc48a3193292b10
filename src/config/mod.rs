// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration for ports, database, auth, CORS, and challenges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the `LiftShare` server
//!
//! All settings come from environment variables (see [`environment`]); the
//! server binary can override the port and database URL on the command line.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, ChallengeConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment,
    ServerConfig,
};
