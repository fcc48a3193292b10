// ABOUTME: Challenge domain models: goal types, challenge windows, participants, leaderboard
// ABOUTME: Includes the completion percentage rule used by the challenge summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::challenges::MAX_PERCENT;
use crate::errors::AppError;

/// Accumulation rule of a challenge
///
/// The set is closed: a stored value outside these three is rejected when the
/// row is decoded rather than silently ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// One point per published workout
    WorkoutsCount,
    /// Total kilograms lifted (reps × weight)
    WeightLifted,
    /// Total distance covered
    Distance,
}

impl GoalType {
    /// All goal types, in schema order
    pub const ALL: [Self; 3] = [Self::WorkoutsCount, Self::WeightLifted, Self::Distance];

    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkoutsCount => "workouts_count",
            Self::WeightLifted => "weight_lifted",
            Self::Distance => "distance",
        }
    }
}

impl Display for GoalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workouts_count" => Ok(Self::WorkoutsCount),
            "weight_lifted" => Ok(Self::WeightLifted),
            "distance" => Ok(Self::Distance),
            _ => Err(AppError::invalid_input(format!(
                "Unrecognized challenge goal type: {s}"
            ))),
        }
    }
}

/// A time-boxed competitive goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Challenge ID
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// First instant of the active window (inclusive)
    pub start_date: DateTime<Utc>,
    /// Last instant of the active window (inclusive)
    pub end_date: DateTime<Utc>,
    /// Accumulation rule
    pub goal_type: GoalType,
    /// Target progress value
    pub goal_value: f64,
}

impl Challenge {
    /// Whether `now` falls inside the inclusive `[start_date, end_date]` window
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}

/// Fields required to create a challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChallenge {
    /// Title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Window start (inclusive)
    pub start_date: DateTime<Utc>,
    /// Window end (inclusive)
    pub end_date: DateTime<Utc>,
    /// Accumulation rule
    pub goal_type: GoalType,
    /// Target progress value
    pub goal_value: f64,
}

impl NewChallenge {
    /// Check the window ordering and goal value
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank, the window ends before it starts,
    /// or the goal value is negative
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::missing_field("title"));
        }
        if self.end_date < self.start_date {
            return Err(AppError::invalid_input(
                "Challenge end_date must not be before start_date",
            ));
        }
        if self.goal_value < 0.0 || !self.goal_value.is_finite() {
            return Err(AppError::out_of_range(
                "Challenge goal_value must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// A user's membership in a challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeParticipant {
    /// Challenge ID
    pub challenge_id: Uuid,
    /// Participating user
    pub user_id: Uuid,
    /// Accumulated progress toward the goal
    pub progress_value: f64,
    /// When the user joined
    pub joined_at: DateTime<Utc>,
}

/// A challenge the user takes part in whose window contains the publish time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChallenge {
    /// Challenge ID
    pub challenge_id: Uuid,
    /// Accumulation rule
    pub goal_type: GoalType,
}

/// One increment applied to a participant row during a publish
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Challenge ID
    pub challenge_id: Uuid,
    /// Rule that produced the increment
    pub goal_type: GoalType,
    /// Amount added to `progress_value`
    pub delta: f64,
}

/// Leaderboard row of a challenge summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Participant
    pub user_id: Uuid,
    /// Accumulated progress
    pub progress_value: f64,
    /// Username
    pub username: String,
    /// Display name
    pub display_name: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
}

/// Percentage of the goal reached, rounded half up and capped at 100
///
/// Returns `None` when the goal value is not positive.
#[must_use]
pub fn completion_percent(progress: f64, goal_value: f64) -> Option<i64> {
    if goal_value > 0.0 {
        let rounded = (progress / goal_value * 100.0 + 0.5).floor();
        Some((rounded as i64).min(MAX_PERCENT))
    } else {
        None
    }
}
