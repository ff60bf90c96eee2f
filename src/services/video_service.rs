//! src/services/video_service.rs
//!
//! VideoService — reads and writes video metadata records in SQLite.
//! Records are keyed by video ID; this service never touches asset files.

use crate::models::video::Video;
use chrono::Utc;
use sqlx::SqlitePool;
use std::{path::Path, sync::Arc};
use thiserror::Error;
use uuid::Uuid;

/// Schema applied by `run_migrations`; every statement is idempotent.
const INIT_MIGRATION: &str = include_str!("../../migrations/0001_init.sql");

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("video `{0}` not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type VideoResult<T> = Result<T, VideoError>;

/// Why a caller may not act on a video.
#[derive(Debug, Error)]
pub enum OwnershipError {
    #[error(transparent)]
    Lookup(#[from] VideoError),
    #[error("video `{video_id}` is not owned by `{user_id}`")]
    NotOwner { video_id: Uuid, user_id: Uuid },
}

#[derive(Clone)]
pub struct VideoService {
    /// Shared SQLite connection pool used for metadata operations.
    pub db: Arc<SqlitePool>,
}

impl VideoService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Fetch a video record by ID.
    ///
    /// Returns NotFound if no row matches.
    pub async fn get_video(&self, id: Uuid) -> VideoResult<Video> {
        sqlx::query_as::<_, Video>(
            "SELECT id, user_id, title, description, thumbnail_url, video_url,
                    created_at, updated_at
             FROM videos WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => VideoError::NotFound(id),
            other => VideoError::Sqlx(other),
        })
    }

    /// Fetch a video and confirm `user_id` owns it.
    pub async fn get_owned_video(&self, id: Uuid, user_id: Uuid) -> Result<Video, OwnershipError> {
        let video = self.get_video(id).await?;
        if !video.is_owned_by(user_id) {
            return Err(OwnershipError::NotOwner {
                video_id: id,
                user_id,
            });
        }
        Ok(video)
    }

    /// Insert a new video record.
    pub async fn create_video(&self, video: &Video) -> VideoResult<()> {
        sqlx::query(
            "INSERT INTO videos (id, user_id, title, description, thumbnail_url, video_url,
                                 created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&*self.db)
        .await?;
        Ok(())
    }

    /// Overwrite the mutable fields of an existing record.
    ///
    /// There is no version check: the last writer wins. Returns NotFound if
    /// the row disappeared since it was read.
    pub async fn update_video(&self, video: &mut Video) -> VideoResult<()> {
        video.updated_at = Utc::now();
        let result = sqlx::query(
            "UPDATE videos
             SET title = ?, description = ?, thumbnail_url = ?, video_url = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.updated_at)
        .bind(video.id)
        .execute(&*self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(VideoError::NotFound(video.id));
        }
        Ok(())
    }
}

/// Apply the embedded schema statement by statement.
pub async fn run_migrations(db: &SqlitePool) -> anyhow::Result<()> {
    let statements = INIT_MIGRATION
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    tracing::info!("Running {} migration statements...", statements.len());

    for stmt in statements {
        tracing::debug!("Executing migration SQL: {}", stmt);
        sqlx::query(stmt).execute(db).await?;
    }

    Ok(())
}

/// Local file path behind a `sqlite://` or `file:` URL, if it names one.
pub fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .trim_start_matches("file:");
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(Path::new(path))
    }
}
