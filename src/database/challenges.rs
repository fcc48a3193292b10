// ABOUTME: Challenge and participant tables, joins, and leaderboard queries
// ABOUTME: Goal types are decoded strictly so unknown stored values surface as errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_db_timestamp, parse_db_uuid, to_db_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Challenge, ChallengeParticipant, GoalType, LeaderboardEntry, NewChallenge};

impl Database {
    /// Create challenge and participant tables
    pub(super) async fn migrate_challenges(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS challenges (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                goal_type TEXT NOT NULL CHECK (goal_type IN ('workouts_count', 'weight_lifted', 'distance')),
                goal_value REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS challenge_participants (
                challenge_id TEXT NOT NULL REFERENCES challenges(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                progress_value REAL NOT NULL DEFAULT 0,
                joined_at TEXT NOT NULL,
                PRIMARY KEY (challenge_id, user_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_challenge_participants_user ON challenge_participants(user_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_challenge_participants_progress ON challenge_participants(challenge_id, progress_value DESC)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_challenges_window ON challenges(start_date, end_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Challenge database operations
pub struct ChallengeManager {
    pool: SqlitePool,
}

impl ChallengeManager {
    /// Create a new challenge manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a challenge
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid window or goal, or a database
    /// error if the insert fails
    pub async fn create_challenge(&self, challenge: &NewChallenge) -> AppResult<Challenge> {
        challenge.validate()?;

        let created = Challenge {
            id: Uuid::new_v4(),
            title: challenge.title.trim().to_owned(),
            description: challenge.description.clone(),
            start_date: challenge.start_date,
            end_date: challenge.end_date,
            goal_type: challenge.goal_type,
            goal_value: challenge.goal_value,
        };

        sqlx::query(
            r"
            INSERT INTO challenges (id, title, description, start_date, end_date, goal_type, goal_value, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(created.id.to_string())
        .bind(&created.title)
        .bind(&created.description)
        .bind(to_db_timestamp(created.start_date))
        .bind(to_db_timestamp(created.end_date))
        .bind(created.goal_type.as_str())
        .bind(created.goal_value)
        .bind(to_db_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create challenge: {e}")))?;

        Ok(created)
    }

    /// Get a challenge by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored goal type is unknown
    pub async fn get_challenge(&self, challenge_id: Uuid) -> AppResult<Option<Challenge>> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, start_date, end_date, goal_type, goal_value
            FROM challenges
            WHERE id = $1
            ",
        )
        .bind(challenge_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get challenge: {e}")))?;

        row.map(|r| Self::row_to_challenge(&r)).transpose()
    }

    /// Add the user to the challenge with zero progress
    ///
    /// Returns `false` when the user already participates; their progress is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn join_challenge(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
        joined_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO challenge_participants (challenge_id, user_id, progress_value, joined_at)
            VALUES ($1, $2, 0, $3)
            ",
        )
        .bind(challenge_id.to_string())
        .bind(user_id.to_string())
        .bind(to_db_timestamp(joined_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to join challenge: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a participant row
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_participant(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ChallengeParticipant>> {
        let row = sqlx::query(
            r"
            SELECT challenge_id, user_id, progress_value, joined_at
            FROM challenge_participants
            WHERE challenge_id = $1 AND user_id = $2
            ",
        )
        .bind(challenge_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get challenge participant: {e}")))?;

        row.map(|r| Self::row_to_participant(&r)).transpose()
    }

    /// Top participants by progress, highest first (ties by join time)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn leaderboard(
        &self,
        challenge_id: Uuid,
        limit: u32,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let rows = sqlx::query(
            r"
            SELECT cp.user_id, cp.progress_value, u.username, u.display_name, u.avatar_url
            FROM challenge_participants cp
            JOIN users u ON u.id = cp.user_id
            WHERE cp.challenge_id = $1
            ORDER BY cp.progress_value DESC, cp.joined_at ASC
            LIMIT $2
            ",
        )
        .bind(challenge_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get challenge leaderboard: {e}")))?;

        rows.iter()
            .map(|row| {
                let user_id: String = row.get("user_id");
                Ok(LeaderboardEntry {
                    user_id: parse_db_uuid(&user_id)?,
                    progress_value: row.get("progress_value"),
                    username: row.get("username"),
                    display_name: row.get("display_name"),
                    avatar_url: row.get("avatar_url"),
                })
            })
            .collect()
    }

    fn row_to_challenge(row: &SqliteRow) -> AppResult<Challenge> {
        let id: String = row.get("id");
        let start_date: String = row.get("start_date");
        let end_date: String = row.get("end_date");
        let goal_type: String = row.get("goal_type");

        Ok(Challenge {
            id: parse_db_uuid(&id)?,
            title: row.get("title"),
            description: row.get("description"),
            start_date: parse_db_timestamp(&start_date)?,
            end_date: parse_db_timestamp(&end_date)?,
            goal_type: decode_goal_type(&goal_type)?,
            goal_value: row.get("goal_value"),
        })
    }

    fn row_to_participant(row: &SqliteRow) -> AppResult<ChallengeParticipant> {
        let challenge_id: String = row.get("challenge_id");
        let user_id: String = row.get("user_id");
        let joined_at: String = row.get("joined_at");

        Ok(ChallengeParticipant {
            challenge_id: parse_db_uuid(&challenge_id)?,
            user_id: parse_db_uuid(&user_id)?,
            progress_value: row.get("progress_value"),
            joined_at: parse_db_timestamp(&joined_at)?,
        })
    }
}

/// Decode a stored goal type, reporting unknown values as store corruption
pub(super) fn decode_goal_type(value: &str) -> AppResult<GoalType> {
    value
        .parse()
        .map_err(|e: AppError| AppError::database(e.message))
}
