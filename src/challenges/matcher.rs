// ABOUTME: Finds the challenges a user takes part in that are active at a given instant
// ABOUTME: The window is inclusive at both ends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use super::store::PublishStore;
use crate::errors::AppResult;
use crate::models::ActiveChallenge;

/// Challenges where the user is a participant and `start_date <= now <= end_date`
///
/// An empty list is a normal outcome.
///
/// # Errors
///
/// Returns an error if the store query fails or a stored goal type is unknown
pub async fn find_active_challenges<S>(
    store: &mut S,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Vec<ActiveChallenge>>
where
    S: PublishStore + ?Sized,
{
    let active = store.active_challenges_for_user(user_id, now).await?;
    debug!(%user_id, active = active.len(), "Matched active challenges");
    Ok(active)
}
