// ABOUTME: HTTP server assembly and lifecycle for the LiftShare API
// ABOUTME: Merges route groups, applies middleware layers, and serves until a shutdown signal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{setup_cors, with_request_tracing};
use crate::resources::ServerResources;
use crate::routes::{ChallengeRoutes, HealthRoutes, WorkoutRoutes};

/// `LiftShare` HTTP server
pub struct LiftShareServer {
    resources: Arc<ServerResources>,
}

impl LiftShareServer {
    /// Create a server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Self::build_router(&self.resources)
    }

    /// Build the full application router from shared resources
    #[must_use]
    pub fn build_router(resources: &Arc<ServerResources>) -> Router {
        let router = Router::new()
            .merge(HealthRoutes::routes(Arc::clone(resources)))
            .merge(WorkoutRoutes::routes(Arc::clone(resources)))
            .merge(ChallengeRoutes::routes(Arc::clone(resources)));

        with_request_tracing(router).layer(setup_cors(&resources.config.cors))
    }

    /// Bind the configured address and serve until SIGINT or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, the port cannot be bound,
    /// or the server fails while running
    pub async fn run(self) -> Result<()> {
        let config = &self.resources.config;
        let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", config.host, config.http_port))?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("LiftShare API listening on http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(wait_for_shutdown_signal())
            .await
            .context("HTTP server failed")?;

        info!("LiftShare API stopped");
        Ok(())
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received, draining connections");
}
