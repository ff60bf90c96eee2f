//! src/services/asset_store.rs
//!
//! AssetStore — flat on-disk storage for thumbnail images. Every asset lives
//! at `root/{video_id}{extension}` and is served back under
//! `{base_url}/assets/{video_id}{extension}`.

use crate::models::thumbnail::ThumbnailFormat;
use bytes::Bytes;
use futures::{Stream, StreamExt, pin_mut};
use std::{
    io::{self, ErrorKind},
    path::PathBuf,
};
use thiserror::Error;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AssetError {
    /// The upload stream itself failed (client disconnect, size limit, bad framing).
    #[error("reading upload body: {0}")]
    Source(io::Error),
    /// Creating or writing the destination file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("asset `{0}` not found")]
    NotFound(String),
}

pub type AssetResult<T> = Result<T, AssetError>;

#[derive(Clone, Debug)]
pub struct AssetStore {
    /// Directory holding every thumbnail file.
    pub root: PathBuf,

    /// Scheme, host and port prefix of public asset URLs, without a trailing slash.
    pub base_url: String,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Deterministic on-disk location of a video's thumbnail.
    pub fn asset_path(&self, video_id: Uuid, format: ThumbnailFormat) -> PathBuf {
        self.root.join(format.file_name(video_id))
    }

    /// Public URL for a video's thumbnail.
    pub fn asset_url(&self, video_id: Uuid, format: ThumbnailFormat) -> String {
        format!("{}/assets/{}", self.base_url, format.file_name(video_id))
    }

    /// Stream an upload into the video's thumbnail file.
    ///
    /// The destination is created or truncated in place, so a previous
    /// thumbnail with the same extension is replaced. On failure the partly
    /// written file is removed. Returns the number of bytes written.
    pub async fn write_asset_stream<S>(
        &self,
        video_id: Uuid,
        format: ThumbnailFormat,
        stream: S,
    ) -> AssetResult<u64>
    where
        S: Stream<Item = io::Result<Bytes>>,
    {
        let file_path = self.asset_path(video_id, format);
        let mut file = File::create(&file_path).await?;

        let mut size_bytes: u64 = 0;
        pin_mut!(stream);
        while let Some(chunk_res) = stream.next().await {
            let chunk = match chunk_res {
                Ok(chunk) => chunk,
                Err(err) => {
                    let _ = fs::remove_file(&file_path).await;
                    return Err(AssetError::Source(err));
                }
            };
            size_bytes += chunk.len() as u64;
            if let Err(err) = file.write_all(&chunk).await {
                let _ = fs::remove_file(&file_path).await;
                return Err(AssetError::Io(err));
            }
        }
        if let Err(err) = file.flush().await {
            let _ = fs::remove_file(&file_path).await;
            return Err(AssetError::Io(err));
        }
        if let Err(err) = file.sync_all().await {
            let _ = fs::remove_file(&file_path).await;
            return Err(AssetError::Io(err));
        }

        debug!("wrote {} bytes to {}", size_bytes, file_path.display());
        Ok(size_bytes)
    }

    /// Open a stored asset by its file name (`<uuid><extension>`).
    ///
    /// Names that are not a canonical video ID plus an allowed extension are
    /// reported as NotFound, which also keeps path separators out.
    pub async fn open_asset(&self, file_name: &str) -> AssetResult<(ThumbnailFormat, File)> {
        let (video_id, format) = ThumbnailFormat::parse_file_name(file_name)
            .ok_or_else(|| AssetError::NotFound(file_name.to_string()))?;

        let file = File::open(self.asset_path(video_id, format))
            .await
            .map_err(|err| {
                if err.kind() == ErrorKind::NotFound {
                    AssetError::NotFound(file_name.to_string())
                } else {
                    AssetError::Io(err)
                }
            })?;

        Ok((format, file))
    }
}
