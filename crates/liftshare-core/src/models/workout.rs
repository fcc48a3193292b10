// ABOUTME: Workout, exercise, and set models plus the publish-time workout metrics
// ABOUTME: Input models validate numeric fields so stored loads and distances are never negative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Highest accepted rate of perceived exertion
const MAX_RPE: f64 = 10.0;

/// A logged training session with its exercises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Workout ID
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Title
    pub title: String,
    /// Session date
    pub date: DateTime<Utc>,
    /// Distance covered, if recorded
    pub distance: Option<f64>,
    /// Privacy setting
    pub privacy: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Exercises ordered by position
    pub exercises: Vec<WorkoutExercise>,
}

/// An exercise performed within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Exercise ID
    pub id: Uuid,
    /// Exercise name
    pub exercise_name: String,
    /// Primary muscle group tag
    pub primary_muscle: Option<String>,
    /// Zero-based position within the workout
    pub position: i64,
    /// Sets ordered by set number
    pub sets: Vec<ExerciseSet>,
}

/// One set of an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Set ID
    pub id: Uuid,
    /// One-based set number
    pub set_no: i64,
    /// Repetitions
    pub reps: Option<i64>,
    /// Load in kilograms
    pub weight: Option<f64>,
    /// Rate of perceived exertion
    pub rpe: Option<f64>,
    /// Rest after the set, in seconds
    pub rest_seconds: Option<i64>,
}

/// Reps and load of a stored set, as read by the metrics calculator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SetLoad {
    /// Repetitions; missing counts as zero, fractional stored values are kept
    pub reps: Option<f64>,
    /// Load in kilograms; missing counts as zero
    pub weight: Option<f64>,
}

impl SetLoad {
    /// Load with both values present
    #[must_use]
    pub const fn new(reps: i64, weight: f64) -> Self {
        Self {
            reps: Some(reps as f64),
            weight: Some(weight),
        }
    }

    /// Weight moved by this set (reps × weight)
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.reps.unwrap_or(0.0) * self.weight.unwrap_or(0.0)
    }
}

/// Aggregates computed for a workout when it is published
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutMetrics {
    /// Σ reps × weight over every set of the workout
    pub total_weight: f64,
    /// Stored workout distance, zero when absent
    pub distance: f64,
}

/// Request body for logging a workout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Title, defaults to "Workout"
    pub title: Option<String>,
    /// Session date, defaults to now
    pub date: Option<DateTime<Utc>>,
    /// Distance covered
    pub distance: Option<f64>,
    /// Exercises in order
    #[serde(default)]
    pub exercises: Vec<NewExercise>,
}

/// Exercise within a [`NewWorkout`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExercise {
    /// Exercise name (required)
    pub exercise_name: Option<String>,
    /// Primary muscle group tag
    pub primary_muscle: Option<String>,
    /// Sets in order
    #[serde(default)]
    pub sets: Vec<NewSet>,
}

/// Set within a [`NewExercise`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NewSet {
    /// Set number, defaults to the one-based position
    pub set_no: Option<i64>,
    /// Repetitions
    pub reps: Option<i64>,
    /// Load in kilograms
    pub weight: Option<f64>,
    /// Rate of perceived exertion (0-10)
    pub rpe: Option<f64>,
    /// Rest after the set, in seconds
    pub rest_seconds: Option<i64>,
}

impl NewWorkout {
    /// Reject blank exercise names and negative or non-finite numbers
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        if let Some(distance) = self.distance {
            ensure_non_negative("distance", distance)?;
        }

        for (index, exercise) in self.exercises.iter().enumerate() {
            let name = exercise.exercise_name.as_deref().map(str::trim);
            if name.map_or(true, str::is_empty) {
                return Err(AppError::missing_field(&format!(
                    "exercises[{index}].exercise_name"
                )));
            }
            for (set_index, set) in exercise.sets.iter().enumerate() {
                set.validate()
                    .map_err(|e| prefix_field(e, &format!("exercises[{index}].sets[{set_index}]")))?;
            }
        }
        Ok(())
    }
}

impl NewSet {
    fn validate(&self) -> AppResult<()> {
        if let Some(set_no) = self.set_no {
            if set_no < 1 {
                return Err(AppError::out_of_range("set_no must be at least 1"));
            }
        }
        if let Some(reps) = self.reps {
            if reps < 0 {
                return Err(AppError::out_of_range("reps must not be negative"));
            }
        }
        if let Some(weight) = self.weight {
            ensure_non_negative("weight", weight)?;
        }
        if let Some(rpe) = self.rpe {
            ensure_non_negative("rpe", rpe)?;
            if rpe > MAX_RPE {
                return Err(AppError::out_of_range("rpe must be between 0 and 10"));
            }
        }
        if let Some(rest) = self.rest_seconds {
            if rest < 0 {
                return Err(AppError::out_of_range("rest_seconds must not be negative"));
            }
        }
        Ok(())
    }
}

fn ensure_non_negative(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "{field} must be a non-negative number"
        )))
    }
}

fn prefix_field(mut error: AppError, path: &str) -> AppError {
    error.message = format!("{path}: {}", error.message);
    error
}
