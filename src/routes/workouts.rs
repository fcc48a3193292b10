// ABOUTME: Route handlers for logging, reading, and publishing workouts
// ABOUTME: Publish-with-metrics runs post creation and challenge progress in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout routes
//!
//! All endpoints require a bearer token.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{authenticate, parse_path_id};
use crate::challenges::{
    publish_workout, publish_workout_with_metrics, PublishOutcome, PublishRequest,
};
use crate::constants::failure_keys;
use crate::database::SqlitePublishStore;
use crate::errors::{AppError, AppResult};
use crate::models::NewWorkout;
use crate::resources::ServerResources;

// ============================================================================
// Request and Response Types
// ============================================================================

/// Body of the publish endpoints; may be omitted entirely
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PublishBody {
    /// Post caption
    pub caption: Option<String>,
}

/// Response carrying the ID of a created resource
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Created resource ID
    pub id: Uuid,
}

/// Response of `POST /api/workouts/:id/publish-metrics`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishMetricsResponse {
    /// Created post ID
    pub id: Uuid,
    /// Σ reps × weight over the workout's sets
    pub total_weight: f64,
    /// Workout distance, zero when absent
    pub distance: f64,
}

impl From<&PublishOutcome> for PublishMetricsResponse {
    fn from(outcome: &PublishOutcome) -> Self {
        Self {
            id: outcome.post_id,
            total_weight: outcome.metrics.total_weight,
            distance: outcome.metrics.distance,
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", post(Self::handle_create_workout))
            .route("/api/workouts/:id", get(Self::handle_get_workout))
            .route("/api/workouts/:id/publish", post(Self::handle_publish))
            .route(
                "/api/workouts/:id/publish-metrics",
                post(Self::handle_publish_metrics),
            )
            .with_state(resources)
    }

    /// Handle POST /api/workouts - Log a workout with exercises and sets
    async fn handle_create_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<NewWorkout>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Json(workout) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid workout body: {e}")))?;

        let id = resources
            .workouts()
            .create_workout(auth.user_id, &workout, Utc::now())
            .await
            .map_err(|e| e.with_failure_key(failure_keys::CREATE_WORKOUT_FAILED))?;

        Ok((StatusCode::OK, Json(CreatedResponse { id })).into_response())
    }

    /// Handle GET /api/workouts/:id - Read one of the caller's workouts
    async fn handle_get_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let workout_id = parse_path_id(&id, "workout")?;

        let workout = resources
            .workouts()
            .get_workout(workout_id)
            .await
            .map_err(|e| e.with_failure_key(failure_keys::GET_WORKOUT_FAILED))?
            // Other users' workouts are reported as absent
            .filter(|w| w.user_id == auth.user_id)
            .ok_or_else(|| AppError::not_found(format!("Workout {workout_id}")))?;

        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle POST /api/workouts/:id/publish - Create a feed post for a workout
    async fn handle_publish(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        body: Option<Json<PublishBody>>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let request = Self::publish_request(auth.user_id, &id, body)?;

        let post_id = async {
            let mut store = SqlitePublishStore::begin(resources.database.pool()).await?;
            let post_id = publish_workout(&mut store, &request, Utc::now()).await?;
            store.commit().await?;
            Ok::<_, AppError>(post_id)
        }
        .await
        .map_err(|e| e.with_failure_key(failure_keys::PUBLISH_FAILED))?;

        Ok((StatusCode::OK, Json(CreatedResponse { id: post_id })).into_response())
    }

    /// Handle POST /api/workouts/:id/publish-metrics - Publish and credit challenge progress
    async fn handle_publish_metrics(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        body: Option<Json<PublishBody>>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let request = Self::publish_request(auth.user_id, &id, body)?;

        let outcome = Self::publish_with_metrics(&resources, &request)
            .await
            .map_err(|e| e.with_failure_key(failure_keys::PUBLISH_METRICS_FAILED))?;

        Ok((StatusCode::OK, Json(PublishMetricsResponse::from(&outcome))).into_response())
    }

    /// Run the whole publish sequence in one transaction; any failure rolls it back
    async fn publish_with_metrics(
        resources: &ServerResources,
        request: &PublishRequest,
    ) -> AppResult<PublishOutcome> {
        let mut store = SqlitePublishStore::begin(resources.database.pool()).await?;
        let outcome = publish_workout_with_metrics(&mut store, request, Utc::now()).await?;
        store.commit().await?;
        Ok(outcome)
    }

    fn publish_request(
        user_id: Uuid,
        workout_id: &str,
        body: Option<Json<PublishBody>>,
    ) -> AppResult<PublishRequest> {
        let Json(body) = body.unwrap_or_default();
        Ok(PublishRequest {
            user_id,
            workout_id: parse_path_id(workout_id, "workout")?,
            caption: body.caption,
        })
    }
}
