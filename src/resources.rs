// ABOUTME: Shared server resources injected into every route handler
// ABOUTME: Database, authentication, and configuration behind Arc for cheap cloning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::{ChallengeManager, Database, WorkoutManager};
use crate::middleware::AuthMiddleware;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Store
    pub database: Arc<Database>,
    /// Token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Identity resolver for request headers
    pub auth_middleware: Arc<AuthMiddleware>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources, deriving the auth manager from the configured secret
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let auth_manager = AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        );
        Self::with_auth_manager(database, auth_manager, config)
    }

    /// Assemble resources around an existing auth manager
    #[must_use]
    pub fn with_auth_manager(
        database: Database,
        auth_manager: AuthManager,
        config: ServerConfig,
    ) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);
        let auth_middleware = Arc::new(AuthMiddleware::new(
            Arc::clone(&auth_manager),
            Arc::clone(&database),
        ));

        Self {
            database,
            auth_manager,
            auth_middleware,
            config: Arc::new(config),
        }
    }

    /// Workout manager on the shared pool
    #[must_use]
    pub fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.database.pool().clone())
    }

    /// Challenge manager on the shared pool
    #[must_use]
    pub fn challenges(&self) -> ChallengeManager {
        ChallengeManager::new(self.database.pool().clone())
    }
}
