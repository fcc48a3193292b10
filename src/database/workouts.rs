// ABOUTME: Workout, exercise, and set tables with transactional workout creation
// ABOUTME: Reads a workout back with its exercises and sets in display order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::transactions::SqliteTransactionGuard;
use super::{parse_db_timestamp, parse_db_uuid, to_db_timestamp, Database};
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseSet, NewWorkout, Workout, WorkoutExercise};

/// Privacy assigned to newly logged workouts
const DEFAULT_PRIVACY: &str = "private";

impl Database {
    /// Create workout, exercise, and set tables
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                date TEXT NOT NULL,
                distance REAL,
                privacy TEXT NOT NULL DEFAULT 'private',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_name TEXT NOT NULL,
                primary_muscle TEXT,
                position INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sets (
                id TEXT PRIMARY KEY,
                workout_exercise_id TEXT NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
                set_no INTEGER NOT NULL,
                reps INTEGER,
                weight REAL,
                rpe REAL,
                rest_seconds INTEGER
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sets_exercise ON sets(workout_exercise_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Workout database operations
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a new workout manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a workout with its exercises and sets in one transaction
    ///
    /// The input is validated first; nothing is written if any field is invalid.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid input, or a database error if an
    /// insert fails (in which case the whole workout is rolled back)
    pub async fn create_workout(
        &self,
        user_id: Uuid,
        workout: &NewWorkout,
        now: DateTime<Utc>,
    ) -> AppResult<Uuid> {
        workout.validate()?;

        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        let mut guard = SqliteTransactionGuard::new(tx);

        let workout_id = Uuid::new_v4();
        let title = workout
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(defaults::WORKOUT_TITLE);

        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, title, date, distance, privacy, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .bind(title)
        .bind(to_db_timestamp(workout.date.unwrap_or(now)))
        .bind(workout.distance)
        .bind(DEFAULT_PRIVACY)
        .bind(to_db_timestamp(now))
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        for (position, exercise) in workout.exercises.iter().enumerate() {
            let exercise_id = Uuid::new_v4();
            sqlx::query(
                r"
                INSERT INTO workout_exercises (id, workout_id, exercise_name, primary_muscle, position)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(exercise_id.to_string())
            .bind(workout_id.to_string())
            .bind(exercise.exercise_name.as_deref().map(str::trim))
            .bind(&exercise.primary_muscle)
            .bind(position as i64)
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to create workout exercise: {e}")))?;

            for (index, set) in exercise.sets.iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO sets (id, workout_exercise_id, set_no, reps, weight, rpe, rest_seconds)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ",
                )
                .bind(Uuid::new_v4().to_string())
                .bind(exercise_id.to_string())
                .bind(set.set_no.unwrap_or(index as i64 + 1))
                .bind(set.reps)
                .bind(set.weight)
                .bind(set.rpe)
                .bind(set.rest_seconds)
                .execute(guard.executor()?)
                .await
                .map_err(|e| AppError::database(format!("Failed to create set: {e}")))?;
            }
        }

        guard.commit().await?;
        debug!(%workout_id, %user_id, exercises = workout.exercises.len(), "Workout created");
        Ok(workout_id)
    }

    /// Get a workout with its exercises (by position) and sets (by set number)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row cannot be decoded
    pub async fn get_workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>> {
        let Some(row) = sqlx::query(
            r"
            SELECT id, user_id, title, date, distance, privacy, created_at
            FROM workouts
            WHERE id = $1
            ",
        )
        .bind(workout_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?
        else {
            return Ok(None);
        };

        let mut workout = Self::row_to_workout(&row)?;

        let exercise_rows = sqlx::query(
            r"
            SELECT id, exercise_name, primary_muscle, position
            FROM workout_exercises
            WHERE workout_id = $1
            ORDER BY position ASC
            ",
        )
        .bind(workout_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout exercises: {e}")))?;

        workout.exercises = exercise_rows
            .iter()
            .map(Self::row_to_exercise)
            .collect::<AppResult<Vec<_>>>()?;

        let set_rows = sqlx::query(
            r"
            SELECT s.id, s.workout_exercise_id,
                   CAST(s.set_no AS INTEGER) AS set_no,
                   CAST(s.reps AS INTEGER) AS reps,
                   CAST(s.weight AS REAL) AS weight,
                   CAST(s.rpe AS REAL) AS rpe,
                   CAST(s.rest_seconds AS INTEGER) AS rest_seconds
            FROM sets s
            JOIN workout_exercises we ON we.id = s.workout_exercise_id
            WHERE we.workout_id = $1
            ORDER BY s.set_no ASC
            ",
        )
        .bind(workout_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout sets: {e}")))?;

        for row in &set_rows {
            let exercise_id: String = row.get("workout_exercise_id");
            let exercise_id = parse_db_uuid(&exercise_id)?;
            let set = Self::row_to_set(row)?;
            if let Some(exercise) = workout.exercises.iter_mut().find(|e| e.id == exercise_id) {
                exercise.sets.push(set);
            }
        }

        Ok(Some(workout))
    }

    fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let date: String = row.get("date");
        let created_at: String = row.get("created_at");

        Ok(Workout {
            id: parse_db_uuid(&id)?,
            user_id: parse_db_uuid(&user_id)?,
            title: row.get("title"),
            date: parse_db_timestamp(&date)?,
            distance: row.get("distance"),
            privacy: row.get("privacy"),
            created_at: parse_db_timestamp(&created_at)?,
            exercises: Vec::new(),
        })
    }

    fn row_to_exercise(row: &SqliteRow) -> AppResult<WorkoutExercise> {
        let id: String = row.get("id");

        Ok(WorkoutExercise {
            id: parse_db_uuid(&id)?,
            exercise_name: row.get("exercise_name"),
            primary_muscle: row.get("primary_muscle"),
            position: row.get("position"),
            sets: Vec::new(),
        })
    }

    fn row_to_set(row: &SqliteRow) -> AppResult<ExerciseSet> {
        let id: String = row.get("id");

        let decode_error = |e: sqlx::Error| AppError::database(format!("Failed to decode set: {e}"));

        Ok(ExerciseSet {
            id: parse_db_uuid(&id)?,
            set_no: row.try_get("set_no").map_err(decode_error)?,
            reps: row.try_get("reps").map_err(decode_error)?,
            weight: row.try_get("weight").map_err(decode_error)?,
            rpe: row.try_get("rpe").map_err(decode_error)?,
            rest_seconds: row.try_get("rest_seconds").map_err(decode_error)?,
        })
    }
}
