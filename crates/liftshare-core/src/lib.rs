// ABOUTME: Core types and constants for the LiftShare social training backend
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `LiftShare` Core
//!
//! Foundation crate providing shared types and constants for the `LiftShare`
//! server. It is designed to change infrequently so the server crate benefits
//! from incremental compilation.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the JSON error body
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Workouts, posts, challenges, and participants

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration defaults organized by domain
pub mod constants;

/// Core data models (Workout, Post, Challenge, `GoalType`, ...)
pub mod models;
