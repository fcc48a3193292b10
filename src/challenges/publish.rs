// ABOUTME: Publish orchestrator: creates the workout post, computes metrics, advances challenges
// ABOUTME: Steps run in sequence against one store so the caller can commit them as a unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::matcher::find_active_challenges;
use super::metrics::compute_metrics;
use super::progress::apply_progress;
use super::store::PublishStore;
use crate::errors::AppResult;
use crate::models::{NewPost, ProgressUpdate, WorkoutMetrics};

/// Who publishes which workout, with an optional caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Authenticated author
    pub user_id: Uuid,
    /// Workout linked by the post
    pub workout_id: Uuid,
    /// Caption; empty is treated as absent
    pub caption: Option<String>,
}

/// Result of a publish with metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishOutcome {
    /// Created post
    pub post_id: Uuid,
    /// Metrics computed for the workout
    pub metrics: WorkoutMetrics,
    /// Increments applied, one per challenge that advanced
    pub updates: Vec<ProgressUpdate>,
}

/// Create a visible workout post without touching challenge progress
///
/// # Errors
///
/// Returns an error if the post insert fails
pub async fn publish_workout<S>(
    store: &mut S,
    request: &PublishRequest,
    now: DateTime<Utc>,
) -> AppResult<Uuid>
where
    S: PublishStore + ?Sized,
{
    let post = NewPost::for_workout(
        request.user_id,
        request.workout_id,
        request.caption.clone(),
        now,
    );
    store.insert_post(&post).await?;
    info!(post_id = %post.id, workout_id = %request.workout_id, "Workout published");
    Ok(post.id)
}

/// Publish a workout and credit its metrics to the author's active challenges
///
/// 1. insert the post
/// 2. compute total weight and distance
/// 3. match the author's challenges active at `now`
/// 4. apply each match's accumulation rule
///
/// The first failing step aborts the sequence; steps already issued are not
/// undone here, so callers run this inside a transaction.
///
/// # Errors
///
/// Returns an error if any store operation fails or a stored goal type is unknown
#[tracing::instrument(
    skip(store, request, now),
    fields(user_id = %request.user_id, workout_id = %request.workout_id)
)]
pub async fn publish_workout_with_metrics<S>(
    store: &mut S,
    request: &PublishRequest,
    now: DateTime<Utc>,
) -> AppResult<PublishOutcome>
where
    S: PublishStore + ?Sized,
{
    let post_id = publish_workout(store, request, now).await?;
    let metrics = compute_metrics(store, request.workout_id).await?;

    let mut updates = Vec::new();
    for challenge in find_active_challenges(store, request.user_id, now).await? {
        if let Some(update) = apply_progress(store, &challenge, request.user_id, &metrics).await? {
            updates.push(update);
        }
    }

    info!(
        %post_id,
        total_weight = metrics.total_weight,
        distance = metrics.distance,
        challenge_updates = updates.len(),
        "Workout published with metrics"
    );

    Ok(PublishOutcome {
        post_id,
        metrics,
        updates,
    })
}
