//! Represents a video's metadata record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata describing a single uploaded video.
///
/// The record is owned by exactly one user. Only `thumbnail_url` and
/// `updated_at` are touched by the thumbnail upload workflow.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct Video {
    /// Unique identifier for this video.
    pub id: Uuid,

    /// ID of the user that owns this video.
    pub user_id: Uuid,

    pub title: String,

    pub description: String,

    /// Public URL of the thumbnail asset; `None` until the first upload.
    pub thumbnail_url: Option<String>,

    /// Public URL of the video payload, managed outside this service.
    pub video_url: Option<String>,

    /// When this record was created.
    pub created_at: DateTime<Utc>,

    /// When this record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Build a fresh record owned by `user_id` with no assets attached.
    pub fn new(user_id: Uuid, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: description.into(),
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
