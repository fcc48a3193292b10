// ABOUTME: Challenge summary: challenge row, leaderboard, caller progress, percent complete
// ABOUTME: Serialized as the body of GET /api/challenges/:id/summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::ChallengeManager;
use crate::errors::{AppError, AppResult};
use crate::models::{completion_percent, Challenge, LeaderboardEntry};

/// Summary of a challenge from one participant's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSummary {
    /// The challenge
    pub challenge: Challenge,
    /// Participants by progress, highest first
    pub top: Vec<LeaderboardEntry>,
    /// Caller's progress; zero when they have not joined
    pub my_progress: f64,
    /// Percentage of the goal reached, `null` when the goal is not positive
    pub percent: Option<i64>,
}

impl ChallengeSummary {
    /// Assemble a summary, deriving the completion percentage
    #[must_use]
    pub fn new(challenge: Challenge, top: Vec<LeaderboardEntry>, my_progress: f64) -> Self {
        let percent = completion_percent(my_progress, challenge.goal_value);
        Self {
            challenge,
            top,
            my_progress,
            percent,
        }
    }
}

/// Load the summary of `challenge_id` for `user_id`
///
/// # Errors
///
/// Returns `not_found` if the challenge does not exist, or a database error if
/// a query fails
#[tracing::instrument(skip(challenges))]
pub async fn load_challenge_summary(
    challenges: &ChallengeManager,
    challenge_id: Uuid,
    user_id: Uuid,
    leaderboard_limit: u32,
) -> AppResult<ChallengeSummary> {
    let challenge = challenges
        .get_challenge(challenge_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Challenge {challenge_id}")))?;

    let top = challenges
        .leaderboard(challenge_id, leaderboard_limit)
        .await?;
    let my_progress = challenges
        .get_participant(challenge_id, user_id)
        .await?
        .map_or(0.0, |participant| participant.progress_value);

    Ok(ChallengeSummary::new(challenge, top, my_progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalType;
    use chrono::{Duration, Utc};

    fn challenge(goal_value: f64) -> Challenge {
        let now = Utc::now();
        Challenge {
            id: Uuid::new_v4(),
            title: "Spring volume".to_owned(),
            description: Some("Lift as much as you can".to_owned()),
            start_date: now,
            end_date: now + Duration::days(30),
            goal_type: GoalType::WeightLifted,
            goal_value,
        }
    }

    #[test]
    fn test_summary_percent() {
        assert_eq!(ChallengeSummary::new(challenge(100.0), Vec::new(), 40.0).percent, Some(40));
        assert_eq!(ChallengeSummary::new(challenge(100.0), Vec::new(), 250.0).percent, Some(100));
        assert_eq!(ChallengeSummary::new(challenge(0.0), Vec::new(), 25.0).percent, None);
    }

    #[test]
    fn test_summary_wire_shape() {
        let summary = ChallengeSummary::new(challenge(500.0), Vec::new(), 880.0);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["myProgress"].as_f64(), Some(880.0));
        assert_eq!(json["percent"], 100);
        assert_eq!(json["challenge"]["goal_type"], "weight_lifted");
        assert!(json["top"].as_array().unwrap().is_empty());

        let no_goal = serde_json::to_value(ChallengeSummary::new(challenge(0.0), Vec::new(), 1.0))
            .unwrap();
        assert!(no_goal["percent"].is_null());
    }
}
