// ABOUTME: Tests for the transactional SQLite publish store
// ABOUTME: Commit, explicit rollback, drop rollback, metrics, and window boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, Utc};
use liftshare_server::{
    challenges::{compute_metrics, find_active_challenges, PublishStore},
    database::SqlitePublishStore,
    models::{GoalType, NewPost},
};

#[tokio::test]
async fn test_dropped_store_rolls_back() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, _) = common::create_test_user(&resources, "alice").await.unwrap();
    let workout_id = common::create_workout(&resources, user.id, &common::workout_with_sets(None, &[]))
        .await
        .unwrap();

    {
        let mut store = SqlitePublishStore::begin(resources.database.pool())
            .await
            .unwrap();
        store
            .insert_post(&NewPost::for_workout(user.id, workout_id, None, Utc::now()))
            .await
            .unwrap();
    }

    assert_eq!(
        common::count_posts_for_workout(&resources, workout_id)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_explicit_rollback_discards_progress() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, _) = common::create_test_user(&resources, "bob").await.unwrap();
    let challenge = common::create_active_challenge(&resources, GoalType::WorkoutsCount, 3.0)
        .await
        .unwrap();
    common::join(&resources, challenge.id, user.id).await.unwrap();

    let mut store = SqlitePublishStore::begin(resources.database.pool())
        .await
        .unwrap();
    let updated = store
        .increment_progress(challenge.id, user.id, 1.0)
        .await
        .unwrap();
    assert_eq!(updated, 1);
    store.rollback().await.unwrap();

    assert_eq!(
        common::progress_of(&resources, challenge.id, user.id)
            .await
            .unwrap(),
        Some(0.0)
    );
}

#[tokio::test]
async fn test_commit_persists_post_and_progress() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, _) = common::create_test_user(&resources, "carol").await.unwrap();
    let challenge = common::create_active_challenge(&resources, GoalType::Distance, 10.0)
        .await
        .unwrap();
    common::join(&resources, challenge.id, user.id).await.unwrap();
    let workout_id = common::create_workout(&resources, user.id, &common::workout_with_sets(None, &[]))
        .await
        .unwrap();

    let mut store = SqlitePublishStore::begin(resources.database.pool())
        .await
        .unwrap();
    store
        .insert_post(&NewPost::for_workout(user.id, workout_id, Some("hi".into()), Utc::now()))
        .await
        .unwrap();
    store
        .increment_progress(challenge.id, user.id, 2.5)
        .await
        .unwrap();
    store.commit().await.unwrap();

    assert_eq!(
        common::count_posts_for_workout(&resources, workout_id)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        common::progress_of(&resources, challenge.id, user.id)
            .await
            .unwrap(),
        Some(2.5)
    );
}

#[tokio::test]
async fn test_increment_without_participant_updates_nothing() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, _) = common::create_test_user(&resources, "dave").await.unwrap();
    let challenge = common::create_active_challenge(&resources, GoalType::WorkoutsCount, 3.0)
        .await
        .unwrap();

    let mut store = SqlitePublishStore::begin(resources.database.pool())
        .await
        .unwrap();
    let updated = store
        .increment_progress(challenge.id, user.id, 1.0)
        .await
        .unwrap();
    store.commit().await.unwrap();

    assert_eq!(updated, 0);
}

#[tokio::test]
async fn test_metrics_read_inside_transaction() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, _) = common::create_test_user(&resources, "erin").await.unwrap();
    let mut workout = common::workout_with_sets(Some(3.2), &[(10, 40.0), (8, 60.0)]);
    // A set without weight contributes nothing
    workout.exercises[0].sets[0].weight = None;
    let workout_id = common::create_workout(&resources, user.id, &workout)
        .await
        .unwrap();

    let mut store = SqlitePublishStore::begin(resources.database.pool())
        .await
        .unwrap();
    let metrics = compute_metrics(&mut store, workout_id).await.unwrap();
    store.commit().await.unwrap();

    assert!((metrics.total_weight - 480.0).abs() < f64::EPSILON);
    assert!((metrics.distance - 3.2).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_active_window_bounds_are_inclusive() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, _) = common::create_test_user(&resources, "frank").await.unwrap();
    let now = Utc::now();

    let starts_now = common::create_challenge_between(
        &resources,
        GoalType::WorkoutsCount,
        1.0,
        now,
        now + Duration::days(7),
    )
    .await
    .unwrap();
    let ends_now = common::create_challenge_between(
        &resources,
        GoalType::WeightLifted,
        1.0,
        now - Duration::days(7),
        now,
    )
    .await
    .unwrap();
    let ended = common::create_challenge_between(
        &resources,
        GoalType::Distance,
        1.0,
        now - Duration::days(7),
        now - Duration::seconds(1),
    )
    .await
    .unwrap();
    for challenge_id in [starts_now.id, ends_now.id, ended.id] {
        common::join(&resources, challenge_id, user.id).await.unwrap();
    }

    let mut store = SqlitePublishStore::begin(resources.database.pool())
        .await
        .unwrap();
    let mut active: Vec<_> = find_active_challenges(&mut store, user.id, now)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.challenge_id)
        .collect();
    store.commit().await.unwrap();

    active.sort();
    let mut expected = vec![starts_now.id, ends_now.id];
    expected.sort();
    assert_eq!(active, expected);
}
