// ABOUTME: HTTP tests for logging and reading workouts
// ABOUTME: Defaults, ordering, validation errors, and owner-only reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_and_get_workout() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_test_user(&resources, "alice").await.unwrap();

    let created = AxumTestRequest::post("/api/workouts")
        .bearer(&token)
        .json(&json!({
            "title": "Leg day",
            "distance": 1.5,
            "exercises": [
                {
                    "exercise_name": "Squat",
                    "primary_muscle": "quads",
                    "sets": [
                        { "reps": 5, "weight": 100.0, "rpe": 8.0 },
                        { "reps": 5, "weight": 105.0, "rest_seconds": 180 }
                    ]
                },
                { "exercise_name": "Lunge", "sets": [{ "set_no": 3, "reps": 12 }] }
            ]
        }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(created.status(), 200);
    let created: Value = created.json();
    let workout_id = created["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::get(&format!("/api/workouts/{workout_id}"))
        .bearer(&token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 200);
    let workout: Value = response.json();

    assert_eq!(workout["id"], workout_id.as_str());
    assert_eq!(workout["user_id"], user.id.to_string());
    assert_eq!(workout["title"], "Leg day");
    assert_eq!(workout["distance"].as_f64(), Some(1.5));
    assert_eq!(workout["privacy"], "private");

    let exercises = workout["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["exercise_name"], "Squat");
    assert_eq!(exercises[0]["sets"][0]["set_no"], 1);
    assert_eq!(exercises[0]["sets"][1]["set_no"], 2);
    assert_eq!(exercises[0]["sets"][1]["weight"].as_f64(), Some(105.0));
    assert_eq!(exercises[1]["exercise_name"], "Lunge");
    assert_eq!(exercises[1]["sets"][0]["set_no"], 3);
    assert!(exercises[1]["sets"][0]["weight"].is_null());
}

#[tokio::test]
async fn test_create_workout_defaults() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_test_user(&resources, "bob").await.unwrap();

    let created = AxumTestRequest::post("/api/workouts")
        .bearer(&token)
        .json(&json!({}))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(created.status(), 200);
    let created: Value = created.json();

    let response = AxumTestRequest::get(&format!(
        "/api/workouts/{}",
        created["id"].as_str().unwrap()
    ))
    .bearer(&token)
    .send(common::test_router(&resources))
    .await;
    let workout: Value = response.json();
    assert_eq!(workout["title"], "Workout");
    assert!(workout["distance"].is_null());
    assert!(workout["date"].is_string());
    assert_eq!(workout["exercises"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_create_workout_requires_exercise_name() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_test_user(&resources, "carol").await.unwrap();

    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&token)
        .json(&json!({ "exercises": [{ "exercise_name": "  ", "sets": [] }] }))
        .send(common::test_router(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "missing_required_field");
}

#[tokio::test]
async fn test_create_workout_rejects_negative_values() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_test_user(&resources, "dave").await.unwrap();

    let negative_weight = json!({
        "exercises": [{ "exercise_name": "Row", "sets": [{ "reps": 10, "weight": -5.0 }] }]
    });
    let negative_distance = json!({ "distance": -1.0 });

    for body in [negative_weight, negative_distance] {
        let response = AxumTestRequest::post("/api/workouts")
            .bearer(&token)
            .json(&body)
            .send(common::test_router(&resources))
            .await;
        assert_eq!(response.status(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"], "value_out_of_range");
    }
}

#[tokio::test]
async fn test_create_workout_rejects_malformed_json() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_test_user(&resources, "erin").await.unwrap();

    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&token)
        .raw_json("{\"title\": ")
        .send(common::test_router(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_get_workout_of_another_user_is_not_found() {
    let resources = common::create_test_resources().await.unwrap();
    let (owner, _) = common::create_test_user(&resources, "owner").await.unwrap();
    let (_, other_token) = common::create_test_user(&resources, "other").await.unwrap();
    let workout_id = common::create_workout(
        &resources,
        owner.id,
        &common::workout_with_sets(None, &[(5, 50.0)]),
    )
    .await
    .unwrap();

    let response = AxumTestRequest::get(&format!("/api/workouts/{workout_id}"))
        .bearer(&other_token)
        .send(common::test_router(&resources))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_get_missing_workout_is_not_found() {
    let resources = common::create_test_resources().await.unwrap();
    let (_, token) = common::create_test_user(&resources, "frank").await.unwrap();

    let response = AxumTestRequest::get(&format!("/api/workouts/{}", uuid::Uuid::new_v4()))
        .bearer(&token)
        .send(common::test_router(&resources))
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_get_workout_coerces_stored_set_values() {
    let resources = common::create_test_resources().await.unwrap();
    let (user, token) = common::create_test_user(&resources, "gina").await.unwrap();
    let workout_id = common::create_workout(
        &resources,
        user.id,
        &common::workout_with_sets(None, &[(5, 80.0)]),
    )
    .await
    .unwrap();

    sqlx::query("UPDATE sets SET reps = 5.5, weight = 80")
        .execute(resources.database.pool())
        .await
        .unwrap();

    let response = AxumTestRequest::get(&format!("/api/workouts/{workout_id}"))
        .bearer(&token)
        .send(common::test_router(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let workout: Value = response.json();
    let set = &workout["exercises"][0]["sets"][0];
    assert_eq!(set["reps"], 5);
    assert_eq!(set["weight"].as_f64(), Some(80.0));
}
