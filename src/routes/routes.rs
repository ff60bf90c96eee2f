//! Defines routes for the thumbnail service.
//!
//! ## Structure
//! - **Upload**
//!   - `POST /api/thumbnail_upload/{video_id}` — multipart thumbnail upload
//!
//! - **Video records**
//!   - `POST /api/videos` — create a video owned by the caller
//!   - `GET  /api/videos/{video_id}` — fetch a video record
//!
//! - **Assets**
//!   - `GET  /assets/{file_name}` — stream a stored thumbnail
//!
//! Request bodies are capped at `MAX_UPLOAD_SIZE` for every route. The cap is
//! enforced by the extractors while the body is read, so handlers still run
//! their cheaper checks first and report the overflow in their own format.

use crate::{
    handlers::{
        asset_handlers::get_asset,
        health_handlers::{healthz, readyz},
        thumbnail_handlers::{MAX_UPLOAD_SIZE, upload_thumbnail},
        video_handlers::{create_video, get_video},
    },
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Build and return the router for all service routes.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/thumbnail_upload/{video_id}", post(upload_thumbnail))
        .route("/api/videos", post(create_video))
        .route("/api/videos/{video_id}", get(get_video))
        .route("/assets/{file_name}", get(get_asset))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
}
