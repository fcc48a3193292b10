// ABOUTME: SQLite storage for users, workouts, posts, and challenges
// ABOUTME: Owns the connection pool, schema bootstrap, and timestamp encoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `Database` owns the `SQLite` pool and creates the schema on startup. Each
//! table group lives in its own module with a manager struct wrapping the pool
//! (`UserManager`, `WorkoutManager`, `ChallengeManager`). The publish flow
//! talks to the store through [`SqlitePublishStore`], which holds a single
//! transaction for the whole sequence.
//!
//! Identifiers are stored as TEXT UUIDs. Timestamps are stored as fixed-width
//! RFC 3339 strings in UTC so that lexical comparison in SQL matches
//! chronological order.

mod challenges;
mod posts;
/// RAII transaction guard
pub mod transactions;
mod users;
mod workouts;

pub use challenges::ChallengeManager;
pub use posts::SqlitePublishStore;
pub use users::UserManager;
pub use workouts::WorkoutManager;

use std::fs;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Database manager for the `LiftShare` store
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the database directory cannot be created, the
    /// connection fails, or a migration fails
    pub async fn new(url: &DatabaseUrl) -> Result<Self> {
        let pool = match url {
            // Every connection to `:memory:` opens a separate database; keep exactly one alive
            DatabaseUrl::Memory => SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&url.to_connection_string())
                .await
                .context("Failed to open in-memory SQLite database")?,
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
                // Ensure SQLite creates the database file if it doesn't exist
                let connection_options = format!("{}?mode=rwc", url.to_connection_string());
                SqlitePool::connect(&connection_options)
                    .await
                    .with_context(|| format!("Failed to open SQLite database {url}"))?
            }
        };

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a table or index cannot be created
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_workouts().await?;
        self.migrate_posts().await?;
        self.migrate_challenges().await?;
        Ok(())
    }

    /// Round-trip a trivial query, used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}

/// Encode a timestamp for storage (UTC, microsecond precision, `Z` suffix)
#[must_use]
pub fn to_db_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a stored timestamp
///
/// # Errors
///
/// Returns a database error if the value is not RFC 3339
pub fn parse_db_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid date '{value}': {e}")))
}

/// Decode a stored UUID
///
/// # Errors
///
/// Returns a database error if the value is not a UUID
pub fn parse_db_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::database(format!("Invalid UUID '{value}': {e}")))
}
