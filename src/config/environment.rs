// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use liftshare_core::constants::{defaults, env_keys};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string; bare paths are treated as `SQLite` files
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` connection strings
    pub fn parse_url(s: &str) -> Result<Self> {
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            bail!("Only SQLite databases are supported, got: {s}");
        }
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else if path_str.is_empty() {
            bail!("Database path must not be empty");
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/liftshare.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: DatabaseUrl,
}

/// Token verification settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret shared with the token issuer
    pub jwt_secret: String,
    /// Lifetime of tokens minted by this service
    pub jwt_expiry_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: defaults::DEVELOPMENT_JWT_SECRET.to_owned(),
            jwt_expiry_hours: defaults::JWT_EXPIRY_HOURS,
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma separated origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Challenge summary settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Number of participants in the summary leaderboard
    pub leaderboard_limit: u32,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            leaderboard_limit: defaults::CHALLENGE_LEADERBOARD_LIMIT,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Challenge configuration
    pub challenges: ChallengeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            challenges: ChallengeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable, or if
    /// `JWT_SECRET` is missing in production
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment =
            Environment::from_str_or_default(&env_var_or(env_keys::ENVIRONMENT, "development"));

        let jwt_secret = match env::var(env_keys::JWT_SECRET) {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment.is_production() => {
                bail!("{} must be set in production", env_keys::JWT_SECRET)
            }
            _ => {
                warn!(
                    "{} not set, using the development secret",
                    env_keys::JWT_SECRET
                );
                defaults::DEVELOPMENT_JWT_SECRET.to_owned()
            }
        };

        let config = Self {
            http_port: env_var_or(env_keys::HTTP_PORT, &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or(env_keys::HOST, defaults::HOST),
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    env_keys::DATABASE_URL,
                    defaults::DATABASE_URL,
                ))
                .context("Invalid DATABASE_URL value")?,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: env_var_or(
                    env_keys::JWT_EXPIRY_HOURS,
                    &defaults::JWT_EXPIRY_HOURS.to_string(),
                )
                .parse()
                .context("Invalid JWT_EXPIRY_HOURS value")?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or(env_keys::CORS_ALLOWED_ORIGINS, "*"),
            },
            challenges: ChallengeConfig {
                leaderboard_limit: env_var_or(
                    env_keys::CHALLENGE_LEADERBOARD_LIMIT,
                    &defaults::CHALLENGE_LEADERBOARD_LIMIT.to_string(),
                )
                .parse()
                .context("Invalid CHALLENGE_LEADERBOARD_LIMIT value")?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of its accepted range
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            bail!("JWT_EXPIRY_HOURS must be positive");
        }
        if self.challenges.leaderboard_limit == 0 {
            bail!("CHALLENGE_LEADERBOARD_LIMIT must be at least 1");
        }
        Ok(())
    }

    /// One-line summary for startup logs (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "LiftShare config: environment={}, bind={}:{}, database={}, cors={}, leaderboard_limit={}",
            self.environment,
            self.host,
            self.http_port,
            self.database.url,
            self.cors.allowed_origins,
            self.challenges.leaderboard_limit
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_database_urls() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/test.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/test.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("/var/lib/liftshare.db")
                .unwrap()
                .to_connection_string(),
            "sqlite:/var/lib/liftshare.db"
        );
        assert!(DatabaseUrl::parse_url("postgres://localhost/liftshare").is_err());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_auth_config_debug_redacts_secret() {
        let auth = AuthConfig {
            jwt_secret: "super-secret".to_owned(),
            jwt_expiry_hours: 1,
        };
        assert!(!format!("{auth:?}").contains("super-secret"));
    }

    #[test]
    fn test_validate_rejects_zero_leaderboard() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());
        config.challenges.leaderboard_limit = 0;
        assert!(config.validate().is_err());
    }
}
