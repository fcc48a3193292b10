// ABOUTME: Goal-type accumulation rules applied to challenge participants on publish
// ABOUTME: Zero weight or distance issues no write; workout counts always advance by one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::{debug, warn};
use uuid::Uuid;

use super::store::PublishStore;
use crate::constants::challenges::WORKOUTS_COUNT_INCREMENT;
use crate::errors::AppResult;
use crate::models::{ActiveChallenge, GoalType, ProgressUpdate, WorkoutMetrics};

/// Amount a publish adds to a challenge of the given goal type, if any
#[must_use]
pub fn progress_delta(goal_type: GoalType, metrics: &WorkoutMetrics) -> Option<f64> {
    match goal_type {
        GoalType::WorkoutsCount => Some(WORKOUTS_COUNT_INCREMENT),
        GoalType::WeightLifted => (metrics.total_weight > 0.0).then_some(metrics.total_weight),
        GoalType::Distance => (metrics.distance > 0.0).then_some(metrics.distance),
    }
}

/// Apply one matched challenge's accumulation rule for the user
///
/// Returns the update that was issued, or `None` when the rule produced no
/// increment.
///
/// # Errors
///
/// Returns an error if the increment statement fails
pub async fn apply_progress<S>(
    store: &mut S,
    challenge: &ActiveChallenge,
    user_id: Uuid,
    metrics: &WorkoutMetrics,
) -> AppResult<Option<ProgressUpdate>>
where
    S: PublishStore + ?Sized,
{
    let Some(delta) = progress_delta(challenge.goal_type, metrics) else {
        debug!(
            challenge_id = %challenge.challenge_id,
            goal_type = %challenge.goal_type,
            "No progress to apply"
        );
        return Ok(None);
    };

    let updated = store
        .increment_progress(challenge.challenge_id, user_id, delta)
        .await?;
    if updated == 0 {
        warn!(
            challenge_id = %challenge.challenge_id,
            %user_id,
            "Progress increment matched no participant row"
        );
    }

    Ok(Some(ProgressUpdate {
        challenge_id: challenge.challenge_id,
        goal_type: challenge.goal_type,
        delta,
    }))
}
