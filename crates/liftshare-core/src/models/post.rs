// ABOUTME: Feed post models created when a workout is published
// ABOUTME: Post type and visibility enums with their database representations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of feed post
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// A published workout
    #[default]
    Workout,
}

impl PostType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
        }
    }
}

impl Display for PostType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Feed visibility of a post
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityStatus {
    /// Shown in the public feed
    #[default]
    Visible,
}

impl VisibilityStatus {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
        }
    }
}

impl Display for VisibilityStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Post row to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Post ID
    pub id: Uuid,
    /// Author
    pub author_id: Uuid,
    /// Post kind
    pub post_type: PostType,
    /// Linked workout, if any
    pub linked_workout_id: Option<Uuid>,
    /// Optional caption
    pub caption: Option<String>,
    /// Feed visibility
    pub visibility: VisibilityStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Visible workout post authored by `author_id`
    #[must_use]
    pub fn for_workout(
        author_id: Uuid,
        workout_id: Uuid,
        caption: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            post_type: PostType::Workout,
            linked_workout_id: Some(workout_id),
            caption: caption.filter(|c| !c.is_empty()),
            visibility: VisibilityStatus::Visible,
            created_at,
        }
    }
}
