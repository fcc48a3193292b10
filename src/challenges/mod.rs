// ABOUTME: Workout publish flow and challenge progress engine
// ABOUTME: Metrics calculator, challenge matcher, progress accumulator, orchestrator, summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Challenges
//!
//! Publishing a workout with metrics is a read-aggregate-write sequence:
//!
//! ```text
//! insert post -> compute metrics -> match active challenges -> apply progress
//! ```
//!
//! Every step goes through a [`PublishStore`], so the same code runs against a
//! `SQLite` transaction in production and an in-memory fake in tests.
//!
//! Accumulation rules by goal type:
//!
//! | goal type        | increment                          |
//! |------------------|------------------------------------|
//! | `workouts_count` | `+1` on every publish              |
//! | `weight_lifted`  | `+total_weight` when it is positive |
//! | `distance`       | `+distance` when it is positive     |

/// Active challenge lookup
pub mod matcher;
/// Workout metrics calculator
pub mod metrics;
/// Goal-type accumulation rules
pub mod progress;
/// Publish orchestrator
pub mod publish;
/// Store interface used by the publish flow
pub mod store;
/// Challenge summary
pub mod summary;

pub use matcher::find_active_challenges;
pub use metrics::{compute_metrics, total_weight};
pub use progress::{apply_progress, progress_delta};
pub use publish::{publish_workout, publish_workout_with_metrics, PublishOutcome, PublishRequest};
pub use store::PublishStore;
pub use summary::{load_challenge_summary, ChallengeSummary};
