// ABOUTME: Store interface consumed by the publish flow and challenge progress engine
// ABOUTME: The SQLite implementation holds one transaction; tests use an in-memory fake
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{ActiveChallenge, NewPost, SetLoad};

/// Reads and writes performed by one publish event
///
/// Every method takes `&mut self`: an implementation is a single unit of work
/// (for `SQLite`, one open transaction) and callers run the steps in sequence.
#[async_trait]
pub trait PublishStore: Send {
    /// Insert a feed post
    async fn insert_post(&mut self, post: &NewPost) -> AppResult<()>;

    /// Reps and weight of every set belonging to the workout, through its exercises
    async fn workout_set_loads(&mut self, workout_id: Uuid) -> AppResult<Vec<SetLoad>>;

    /// Stored distance of the workout; `None` when the workout or its distance is absent
    async fn workout_distance(&mut self, workout_id: Uuid) -> AppResult<Option<f64>>;

    /// Challenges the user participates in whose inclusive window contains `now`
    async fn active_challenges_for_user(
        &mut self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ActiveChallenge>>;

    /// Add `delta` to an existing participant row in a single statement
    ///
    /// Returns the number of rows updated (0 when the user is not a participant).
    async fn increment_progress(
        &mut self,
        challenge_id: Uuid,
        user_id: Uuid,
        delta: f64,
    ) -> AppResult<u64>;
}
