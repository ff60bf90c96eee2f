use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

use crate::services::video_service::VideoError;

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Shortcut for 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<VideoError> for AppError {
    fn from(err: VideoError) -> Self {
        match err {
            VideoError::NotFound(_) => AppError::not_found("Video not found"),
            VideoError::Sqlx(_) => AppError::internal("Unable to access video metadata"),
        }
    }
}

/// Every way a thumbnail upload can fail, in workflow order.
///
/// The first failing stage wins; the caller only ever sees that one kind.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid ID")]
    InvalidIdentifier,
    #[error("Couldn't find JWT")]
    MissingCredential,
    #[error("Couldn't validate JWT")]
    InvalidCredential,
    #[error("Video not found")]
    RecordNotFound,
    #[error("Unable to load video metadata")]
    MetadataLookupFailure,
    #[error("Video does not belong to user")]
    NotOwner,
    #[error("Unable to parse thumbnail")]
    MissingUploadField,
    #[error("Thumbnail exceeds the upload size limit")]
    UploadTooLarge,
    #[error("Invalid file type")]
    UnsupportedMediaType,
    #[error("Unable to store thumbnail file")]
    StorageWriteFailure,
    #[error("Unable to update video record")]
    MetadataPersistFailure,
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier | Self::MissingUploadField | Self::UnsupportedMediaType => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingCredential | Self::InvalidCredential | Self::NotOwner => {
                StatusCode::UNAUTHORIZED
            }
            Self::RecordNotFound => StatusCode::NOT_FOUND,
            Self::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MetadataLookupFailure
            | Self::StorageWriteFailure
            | Self::MetadataPersistFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::new(err.status(), err.to_string())
    }
}
