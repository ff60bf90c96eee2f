//! Serves stored thumbnails back to clients.
//! Streams file bodies to avoid buffering them in memory.

use crate::{errors::AppError, services::asset_store::AssetError, state::AppState};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use tokio_util::io::ReaderStream;

/// GET `/assets/{file_name}` — stream a thumbnail as `image/jpeg` or `image/png`.
pub async fn get_asset(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, AppError> {
    let (format, file) = state
        .assets
        .open_asset(&file_name)
        .await
        .map_err(|err| match err {
            AssetError::NotFound(_) => AppError::not_found("Asset not found"),
            other => AppError::internal(other.to_string()),
        })?;
    let length = file
        .metadata()
        .await
        .map_err(|err| AppError::internal(err.to_string()))?
        .len();

    let body = Body::from_stream(ReaderStream::new(file));
    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

    Ok(response)
}
