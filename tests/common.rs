// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database, server resources, users, tokens, challenges, and workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `liftshare_server`

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use liftshare_server::{
    auth::AuthManager,
    config::{DatabaseUrl, ServerConfig},
    database::{Database, UserManager},
    models::{Challenge, GoalType, NewChallenge, NewExercise, NewSet, NewWorkout, User},
    resources::ServerResources,
    server::LiftShareServer,
};
use uuid::Uuid;

/// Signing secret shared by every test server
pub const TEST_JWT_SECRET: &str = "liftshare-test-secret";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database with the schema applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new(&DatabaseUrl::Memory).await
}

/// Server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let mut config = ServerConfig::default();
    config.database.url = DatabaseUrl::Memory;
    config.auth.jwt_secret = TEST_JWT_SECRET.to_owned();
    Ok(Arc::new(ServerResources::new(database, config)))
}

/// Full application router over `resources`
pub fn test_router(resources: &Arc<ServerResources>) -> Router {
    LiftShareServer::build_router(resources)
}

/// Auth manager sharing the test secret, with a custom token lifetime
pub fn create_test_auth_manager(expiry_hours: i64) -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET.as_bytes(), expiry_hours)
}

/// Insert a user named `username` and return it with a valid token
pub async fn create_test_user(
    resources: &ServerResources,
    username: &str,
) -> Result<(User, String)> {
    let user = User::new(
        username.to_owned(),
        format!("{username}@example.com"),
        Some(format!("Test {username}")),
    );
    UserManager::new(resources.database.pool().clone())
        .create_user(&user)
        .await?;
    let token = resources.auth_manager.generate_token(&user)?;
    Ok((user, token))
}

/// Insert a challenge covering `[now - 1 day, now + 1 day]`
pub async fn create_active_challenge(
    resources: &ServerResources,
    goal_type: GoalType,
    goal_value: f64,
) -> Result<Challenge> {
    let now = Utc::now();
    create_challenge_between(
        resources,
        goal_type,
        goal_value,
        now - Duration::days(1),
        now + Duration::days(1),
    )
    .await
}

/// Insert a challenge with an explicit window
pub async fn create_challenge_between(
    resources: &ServerResources,
    goal_type: GoalType,
    goal_value: f64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Challenge> {
    let challenge = resources
        .challenges()
        .create_challenge(&NewChallenge {
            title: format!("{goal_type} challenge"),
            description: None,
            start_date,
            end_date,
            goal_type,
            goal_value,
        })
        .await?;
    Ok(challenge)
}

/// Add `user_id` to a challenge
pub async fn join(resources: &ServerResources, challenge_id: Uuid, user_id: Uuid) -> Result<()> {
    resources
        .challenges()
        .join_challenge(challenge_id, user_id, Utc::now())
        .await?;
    Ok(())
}

/// Current progress of a participant, `None` when they have not joined
pub async fn progress_of(
    resources: &ServerResources,
    challenge_id: Uuid,
    user_id: Uuid,
) -> Result<Option<f64>> {
    Ok(resources
        .challenges()
        .get_participant(challenge_id, user_id)
        .await?
        .map(|p| p.progress_value))
}

/// Workout body with one exercise and the given (reps, weight) sets
pub fn workout_with_sets(distance: Option<f64>, sets: &[(i64, f64)]) -> NewWorkout {
    NewWorkout {
        title: Some("Push day".to_owned()),
        date: None,
        distance,
        exercises: vec![NewExercise {
            exercise_name: Some("Bench Press".to_owned()),
            primary_muscle: Some("chest".to_owned()),
            sets: sets
                .iter()
                .map(|&(reps, weight)| NewSet {
                    reps: Some(reps),
                    weight: Some(weight),
                    ..NewSet::default()
                })
                .collect(),
        }],
    }
}

/// Store a workout directly, bypassing HTTP
pub async fn create_workout(
    resources: &ServerResources,
    user_id: Uuid,
    workout: &NewWorkout,
) -> Result<Uuid> {
    Ok(resources
        .workouts()
        .create_workout(user_id, workout, Utc::now())
        .await?)
}

/// Number of posts linked to a workout
pub async fn count_posts_for_workout(resources: &ServerResources, workout_id: Uuid) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE linked_workout_id = $1")
            .bind(workout_id.to_string())
            .fetch_one(resources.database.pool())
            .await?;
    Ok(count)
}
