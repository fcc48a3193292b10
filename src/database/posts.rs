// ABOUTME: Posts table and the transactional SQLite implementation of the publish store
// ABOUTME: One SqlitePublishStore is one transaction; dropping it without commit rolls back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::challenges::decode_goal_type;
use super::transactions::SqliteTransactionGuard;
use super::{parse_db_uuid, to_db_timestamp, Database};
use crate::challenges::PublishStore;
use crate::errors::{AppError, AppResult};
use crate::models::{ActiveChallenge, NewPost, SetLoad};

impl Database {
    /// Create the posts table
    ///
    /// `linked_workout_id` carries no foreign key: a post may reference a
    /// workout this store does not hold.
    pub(super) async fn migrate_posts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                author_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                type TEXT NOT NULL,
                linked_workout_id TEXT,
                caption TEXT,
                visibility_status TEXT NOT NULL DEFAULT 'visible',
                likes_count INTEGER NOT NULL DEFAULT 0,
                comments_count INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at DESC)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_workout ON posts(linked_workout_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Publish store backed by a single `SQLite` transaction
pub struct SqlitePublishStore {
    guard: SqliteTransactionGuard<'static>,
}

impl SqlitePublishStore {
    /// Begin a transaction on the pool
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started
    pub async fn begin(pool: &SqlitePool) -> AppResult<Self> {
        let tx = pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        Ok(Self {
            guard: SqliteTransactionGuard::new(tx),
        })
    }

    /// Commit every write made through this store
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails
    pub async fn commit(self) -> AppResult<()> {
        self.guard.commit().await
    }

    /// Discard every write made through this store
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails
    pub async fn rollback(self) -> AppResult<()> {
        self.guard.rollback().await
    }
}

#[async_trait]
impl PublishStore for SqlitePublishStore {
    async fn insert_post(&mut self, post: &NewPost) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, type, linked_workout_id, caption, visibility_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(post.id.to_string())
        .bind(post.author_id.to_string())
        .bind(post.post_type.as_str())
        .bind(post.linked_workout_id.map(|id| id.to_string()))
        .bind(&post.caption)
        .bind(post.visibility.as_str())
        .bind(to_db_timestamp(post.created_at))
        .execute(self.guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to create post: {e}")))?;

        Ok(())
    }

    async fn workout_set_loads(&mut self, workout_id: Uuid) -> AppResult<Vec<SetLoad>> {
        let rows = sqlx::query(
            r"
            SELECT CAST(s.reps AS REAL) AS reps, CAST(s.weight AS REAL) AS weight
            FROM sets s
            JOIN workout_exercises we ON we.id = s.workout_exercise_id
            WHERE we.workout_id = $1
            ",
        )
        .bind(workout_id.to_string())
        .fetch_all(self.guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to read workout sets: {e}")))?;

        // Columns are cast to REAL above so whatever SQLite stored decodes as a number
        rows.iter()
            .map(|row| {
                Ok(SetLoad {
                    reps: row
                        .try_get("reps")
                        .map_err(|e| AppError::database(format!("Failed to decode reps: {e}")))?,
                    weight: row
                        .try_get("weight")
                        .map_err(|e| AppError::database(format!("Failed to decode weight: {e}")))?,
                })
            })
            .collect()
    }

    async fn workout_distance(&mut self, workout_id: Uuid) -> AppResult<Option<f64>> {
        let distance: Option<Option<f64>> =
            sqlx::query_scalar("SELECT distance FROM workouts WHERE id = $1 LIMIT 1")
                .bind(workout_id.to_string())
                .fetch_optional(self.guard.executor()?)
                .await
                .map_err(|e| AppError::database(format!("Failed to read workout distance: {e}")))?;

        Ok(distance.flatten())
    }

    async fn active_challenges_for_user(
        &mut self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ActiveChallenge>> {
        let rows = sqlx::query(
            r"
            SELECT c.id, c.goal_type
            FROM challenges c
            JOIN challenge_participants cp ON cp.challenge_id = c.id
            WHERE cp.user_id = $1 AND c.start_date <= $2 AND c.end_date >= $2
            ",
        )
        .bind(user_id.to_string())
        .bind(to_db_timestamp(now))
        .fetch_all(self.guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to find active challenges: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let goal_type: String = row.get("goal_type");
                Ok(ActiveChallenge {
                    challenge_id: parse_db_uuid(&id)?,
                    goal_type: decode_goal_type(&goal_type)?,
                })
            })
            .collect()
    }

    async fn increment_progress(
        &mut self,
        challenge_id: Uuid,
        user_id: Uuid,
        delta: f64,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE challenge_participants
            SET progress_value = progress_value + $1
            WHERE challenge_id = $2 AND user_id = $3
            ",
        )
        .bind(delta)
        .bind(challenge_id.to_string())
        .bind(user_id.to_string())
        .execute(self.guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to update challenge progress: {e}")))?;

        Ok(result.rows_affected())
    }
}
