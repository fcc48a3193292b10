// ABOUTME: Application constants organized by domain for the LiftShare server
// ABOUTME: Service names, environment defaults, wire keys, and challenge limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application-wide constants

/// Service identity used in logs and JWT audiences
pub mod service_names {
    /// Server service name
    pub const LIFTSHARE_SERVER: &str = "liftshare-server";
    /// Audience claim carried by access tokens
    pub const TOKEN_AUDIENCE: &str = "liftshare-api";
}

/// Defaults applied when an environment variable is not set
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 4000;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/liftshare.db";
    /// Access token lifetime in hours
    pub const JWT_EXPIRY_HOURS: i64 = 1;
    /// Secret used outside production when `JWT_SECRET` is unset
    pub const DEVELOPMENT_JWT_SECRET: &str = "change_this";
    /// Number of participants returned by the challenge leaderboard
    pub const CHALLENGE_LEADERBOARD_LIMIT: u32 = 10;
    /// Default workout title
    pub const WORKOUT_TITLE: &str = "Workout";
}

/// Environment variable names
pub mod env_keys {
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// JWT signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// JWT lifetime
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// Comma separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Leaderboard size for challenge summaries
    pub const CHALLENGE_LEADERBOARD_LIMIT: &str = "CHALLENGE_LEADERBOARD_LIMIT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Error keys reported by endpoints for server-side failures
pub mod failure_keys {
    /// `POST /api/workouts/:id/publish-metrics`
    pub const PUBLISH_METRICS_FAILED: &str = "publish_metrics_failed";
    /// `POST /api/workouts/:id/publish`
    pub const PUBLISH_FAILED: &str = "publish_failed";
    /// `GET /api/challenges/:id/summary`
    pub const SUMMARY_FAILED: &str = "summary_failed";
    /// `POST /api/challenges/:id/join`
    pub const JOIN_FAILED: &str = "join_challenge_failed";
    /// `POST /api/workouts`
    pub const CREATE_WORKOUT_FAILED: &str = "create_workout_failed";
    /// `GET /api/workouts/:id`
    pub const GET_WORKOUT_FAILED: &str = "get_workout_failed";
}

/// Challenge progress rules
pub mod challenges {
    /// Progress added per publish for `workouts_count` challenges
    pub const WORKOUTS_COUNT_INCREMENT: f64 = 1.0;
    /// Upper bound of the reported completion percentage
    pub const MAX_PERCENT: i64 = 100;
}
