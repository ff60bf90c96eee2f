//! HTTP handlers for video metadata records.

use crate::{errors::AppError, models::video::Video, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Request body for `POST /api/videos`.
#[derive(Debug, Deserialize)]
pub struct CreateVideoReq {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// POST `/api/videos` — create a video owned by the caller.
pub async fn create_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateVideoReq>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = state
        .auth
        .authenticate(&headers)
        .map_err(|err| AppError::new(StatusCode::UNAUTHORIZED, err.to_string()))?;

    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }

    let video = Video::new(user_id, title, payload.description);
    state.videos.create_video(&video).await?;
    info!(video_id = %video.id, %user_id, "created video");

    Ok((StatusCode::CREATED, Json(video)))
}

/// GET `/api/videos/{video_id}` — fetch a single record.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<Video>, AppError> {
    let video_id = Uuid::parse_str(&video_id).map_err(|_| AppError::bad_request("Invalid ID"))?;
    let video = state.videos.get_video(video_id).await?;
    Ok(Json(video))
}
