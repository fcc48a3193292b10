// ABOUTME: Workout metrics calculator: total weight lifted and distance
// ABOUTME: Missing workouts, sets, reps, weights, and distances all count as zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::debug;
use uuid::Uuid;

use super::store::PublishStore;
use crate::errors::AppResult;
use crate::models::{SetLoad, WorkoutMetrics};

/// Σ reps × weight over the given sets
#[must_use]
pub fn total_weight<'a, I>(loads: I) -> f64
where
    I: IntoIterator<Item = &'a SetLoad>,
{
    loads.into_iter().map(SetLoad::volume).sum()
}

/// Compute the publish-time metrics of a workout
///
/// Stored values are used as-is. An unknown workout yields zero metrics rather
/// than an error.
///
/// # Errors
///
/// Returns an error if a store read fails
pub async fn compute_metrics<S>(store: &mut S, workout_id: Uuid) -> AppResult<WorkoutMetrics>
where
    S: PublishStore + ?Sized,
{
    let loads = store.workout_set_loads(workout_id).await?;
    let distance = store.workout_distance(workout_id).await?.unwrap_or(0.0);

    let metrics = WorkoutMetrics {
        total_weight: total_weight(&loads),
        distance,
    };
    debug!(
        %workout_id,
        sets = loads.len(),
        total_weight = metrics.total_weight,
        distance = metrics.distance,
        "Computed workout metrics"
    );
    Ok(metrics)
}
