//! Thumbnail upload handler.
//!
//! `POST /api/thumbnail_upload/{video_id}` runs a strictly linear pipeline:
//! parse the ID, authenticate, confirm ownership, decode the multipart form,
//! check the content type, stream the image to disk and finally point the
//! video record at the stored asset. The first failing step decides the
//! response.

use crate::{
    errors::{AppError, UploadError},
    models::{thumbnail::ThumbnailFormat, video::Video},
    services::{
        asset_store::AssetError,
        video_service::{OwnershipError, VideoError},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{
        FromRequest, Path, Request, State,
        multipart::{Field, Multipart, MultipartError},
    },
    http::{StatusCode, header},
};
use futures::StreamExt;
use std::io::{self, ErrorKind};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Largest request body accepted on upload routes (10 MiB).
pub const MAX_UPLOAD_SIZE: usize = 10 << 20;

/// Multipart field carrying the image.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// `POST /api/thumbnail_upload/{video_id}`
///
/// Returns the updated video record on success.
#[instrument(skip_all, fields(video_id = %video_id))]
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    request: Request,
) -> Result<Json<Video>, AppError> {
    match process_upload(&state, &video_id, request).await {
        Ok(video) => Ok(Json(video)),
        Err(err) => {
            if err.status().is_server_error() {
                error!(error = %err, "thumbnail upload failed");
            } else {
                warn!(error = %err, "thumbnail upload rejected");
            }
            Err(err.into())
        }
    }
}

async fn process_upload(
    state: &AppState,
    raw_video_id: &str,
    request: Request,
) -> Result<Video, UploadError> {
    let video_id = Uuid::parse_str(raw_video_id).map_err(|_| UploadError::InvalidIdentifier)?;

    let user_id = state.auth.authenticate(request.headers()).map_err(|err| {
        debug!(error = %err, "authentication failed");
        if err.is_missing_credential() {
            UploadError::MissingCredential
        } else {
            UploadError::InvalidCredential
        }
    })?;

    info!(%video_id, %user_id, "uploading thumbnail");

    let video = state
        .videos
        .get_owned_video(video_id, user_id)
        .await
        .map_err(|err| match err {
            OwnershipError::NotOwner { .. } => UploadError::NotOwner,
            OwnershipError::Lookup(VideoError::NotFound(_)) => UploadError::RecordNotFound,
            OwnershipError::Lookup(VideoError::Sqlx(err)) => {
                error!(error = %err, "loading video record");
                UploadError::MetadataLookupFailure
            }
        })?;

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|rejection| {
            debug!(error = %rejection, "request is not a multipart form");
            UploadError::MissingUploadField
        })?;

    while let Some(field) = multipart.next_field().await.map_err(decode_error)? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }
        return store_thumbnail(state, video, field).await;
    }

    Err(UploadError::MissingUploadField)
}

/// Validate the part's declared type, write it to disk and update the record.
async fn store_thumbnail(
    state: &AppState,
    mut video: Video,
    field: Field<'_>,
) -> Result<Video, UploadError> {
    // Raw part header: the bytes are never sniffed and the value is not
    // normalized, unlike `Field::content_type`.
    let content_type = field
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let format = ThumbnailFormat::from_content_type(&content_type).ok_or_else(|| {
        debug!(%content_type, "content type not allowed");
        UploadError::UnsupportedMediaType
    })?;

    let path = state.assets.asset_path(video.id, format);
    debug!(path = %path.display(), "writing thumbnail");

    let stream = field.map(|chunk| chunk.map_err(multipart_io_error));
    let size_bytes = state
        .assets
        .write_asset_stream(video.id, format, stream)
        .await
        .map_err(|err| match err {
            AssetError::Source(err) if err.kind() == ErrorKind::FileTooLarge => {
                UploadError::UploadTooLarge
            }
            AssetError::Source(err) => {
                debug!(error = %err, "upload body ended unexpectedly");
                UploadError::MissingUploadField
            }
            other => {
                error!(error = %other, path = %path.display(), "writing thumbnail");
                UploadError::StorageWriteFailure
            }
        })?;

    // A thumbnail stored under the other extension stays on disk.
    if let Some(previous) = video
        .thumbnail_url
        .as_deref()
        .filter(|url| !url.ends_with(format.extension()))
    {
        warn!(%previous, "previous thumbnail uses another format and was left in place");
    }

    video.thumbnail_url = Some(state.assets.asset_url(video.id, format));
    state.videos.update_video(&mut video).await.map_err(|err| {
        error!(error = %err, "persisting video record");
        UploadError::MetadataPersistFailure
    })?;

    info!(size_bytes, "thumbnail stored");
    Ok(video)
}

fn is_too_large(err: &MultipartError) -> bool {
    err.status() == StatusCode::PAYLOAD_TOO_LARGE
}

fn decode_error(err: MultipartError) -> UploadError {
    if is_too_large(&err) {
        UploadError::UploadTooLarge
    } else {
        debug!(error = %err, "malformed multipart body");
        UploadError::MissingUploadField
    }
}

fn multipart_io_error(err: MultipartError) -> io::Error {
    let kind = if is_too_large(&err) {
        ErrorKind::FileTooLarge
    } else {
        ErrorKind::InvalidData
    };
    io::Error::new(kind, err)
}
