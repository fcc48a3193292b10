// ABOUTME: Route handlers for challenge membership and progress summaries
// ABOUTME: Summary combines the challenge, its leaderboard, and the caller's progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{authenticate, parse_path_id};
use crate::challenges::load_challenge_summary;
use crate::constants::failure_keys;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Response of `POST /api/challenges/:id/join`
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinChallengeResponse {
    /// Always `true` on success
    pub ok: bool,
    /// `false` when the caller was already a participant
    pub joined: bool,
}

/// Challenge routes handler
pub struct ChallengeRoutes;

impl ChallengeRoutes {
    /// Create all challenge routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/challenges/:id/summary",
                get(Self::handle_challenge_summary),
            )
            .route("/api/challenges/:id/join", post(Self::handle_join_challenge))
            .with_state(resources)
    }

    /// Handle GET /api/challenges/:id/summary
    async fn handle_challenge_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let challenge_id = parse_path_id(&id, "challenge")?;

        let summary = load_challenge_summary(
            &resources.challenges(),
            challenge_id,
            auth.user_id,
            resources.config.challenges.leaderboard_limit,
        )
        .await
        .map_err(|e| e.with_failure_key(failure_keys::SUMMARY_FAILED))?;

        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle POST /api/challenges/:id/join
    async fn handle_join_challenge(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let challenge_id = parse_path_id(&id, "challenge")?;
        let challenges = resources.challenges();

        let joined = async {
            if challenges.get_challenge(challenge_id).await?.is_none() {
                return Err(AppError::not_found(format!("Challenge {challenge_id}")));
            }
            challenges
                .join_challenge(challenge_id, auth.user_id, Utc::now())
                .await
        }
        .await
        .map_err(|e| e.with_failure_key(failure_keys::JOIN_FAILED))?;

        tracing::info!(
            challenge_id = %challenge_id,
            user_id = %auth.user_id,
            joined,
            "Challenge join processed"
        );

        Ok((StatusCode::OK, Json(JoinChallengeResponse { ok: true, joined })).into_response())
    }
}
