// ABOUTME: Tests for file-backed SQLite databases
// ABOUTME: Directory creation, idempotent migrations, and persistence across reopen
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{Duration, Utc};
use liftshare_server::{
    config::DatabaseUrl,
    database::{ChallengeManager, Database, UserManager},
    models::{GoalType, NewChallenge, User},
};
use tempfile::TempDir;

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("liftshare.db");
    let url = DatabaseUrl::SQLite { path: path.clone() };

    let user = User::new("alice".into(), "alice@example.com".into(), None);
    let challenge_id = {
        let database = Database::new(&url).await.unwrap();
        UserManager::new(database.pool().clone())
            .create_user(&user)
            .await
            .unwrap();
        let now = Utc::now();
        let challenges = ChallengeManager::new(database.pool().clone());
        let challenge = challenges
            .create_challenge(&NewChallenge {
                title: "Spring volume".into(),
                description: Some("Lift 10 tonnes".into()),
                start_date: now,
                end_date: now + Duration::days(30),
                goal_type: GoalType::WeightLifted,
                goal_value: 10_000.0,
            })
            .await
            .unwrap();
        challenges
            .join_challenge(challenge.id, user.id, now)
            .await
            .unwrap();
        database.pool().close().await;
        challenge.id
    };
    assert!(path.exists());

    // Reopening runs the migrations again on an existing schema
    let database = Database::new(&url).await.unwrap();
    let stored = UserManager::new(database.pool().clone())
        .get_user(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.username, "alice");

    let challenges = ChallengeManager::new(database.pool().clone());
    let challenge = challenges.get_challenge(challenge_id).await.unwrap().unwrap();
    assert_eq!(challenge.goal_type, GoalType::WeightLifted);
    assert_eq!(challenge.description.as_deref(), Some("Lift 10 tonnes"));
    let participant = challenges
        .get_participant(challenge_id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(participant.progress_value.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_memory_databases_are_isolated() {
    let first = Database::new(&DatabaseUrl::Memory).await.unwrap();
    let second = Database::new(&DatabaseUrl::Memory).await.unwrap();

    let user = User::new("bob".into(), "bob@example.com".into(), None);
    UserManager::new(first.pool().clone())
        .create_user(&user)
        .await
        .unwrap();

    let missing = UserManager::new(second.pool().clone())
        .get_user(user.id)
        .await
        .unwrap();
    assert!(missing.is_none());
    first.ping().await.unwrap();
}
