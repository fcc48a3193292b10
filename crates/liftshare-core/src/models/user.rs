// ABOUTME: Minimal user model resolved by the authentication middleware
// ABOUTME: Registration and profile editing live outside this service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: Uuid,
    /// Unique handle
    pub username: String,
    /// Display name
    pub display_name: Option<String>,
    /// Email address
    pub email: String,
    /// Avatar URL
    pub avatar_url: Option<String>,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New user with a fresh ID; the display name falls back to the username
    #[must_use]
    pub fn new(username: String, email: String, display_name: Option<String>) -> Self {
        let display_name = display_name.or_else(|| Some(username.clone()));
        Self {
            id: Uuid::new_v4(),
            username,
            display_name,
            email,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }
}
