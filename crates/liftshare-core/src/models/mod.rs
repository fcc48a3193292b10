// ABOUTME: Core domain models for workouts, posts, challenges, and users
// ABOUTME: Shared between the store layer, the challenge engine, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models

mod challenge;
mod post;
mod user;
mod workout;

pub use challenge::{
    completion_percent, ActiveChallenge, Challenge, ChallengeParticipant, GoalType,
    LeaderboardEntry, NewChallenge, ProgressUpdate,
};
pub use post::{NewPost, PostType, VisibilityStatus};
pub use user::User;
pub use workout::{
    ExerciseSet, NewExercise, NewSet, NewWorkout, SetLoad, Workout, WorkoutExercise,
    WorkoutMetrics,
};
