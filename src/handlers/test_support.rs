//! Router-level test harness: in-memory SQLite, a temporary assets root and
//! helpers for building authenticated multipart requests.

use crate::{
    models::video::Video,
    routes::routes::routes,
    services::{
        asset_store::AssetStore, auth_service::AuthService,
        video_service::{VideoService, tests::memory_pool},
    },
    state::AppState,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Response, header},
};
use chrono::Duration;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

const TEST_SECRET: &str = "test-signing-secret";
pub(crate) const BOUNDARY: &str = "thumbnail-test-boundary";

pub(crate) struct TestApp {
    pub state: AppState,
    router: Router,
    _assets_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let assets_dir = TempDir::new().unwrap();
        let state = AppState::new(
            VideoService::new(memory_pool().await),
            AssetStore::new(assets_dir.path(), "http://localhost:8091"),
            AuthService::new(TEST_SECRET),
        );
        let router = routes().with_state(state.clone());
        Self {
            state,
            router,
            _assets_dir: assets_dir,
        }
    }

    pub fn assets_root(&self) -> &Path {
        &self.state.assets.root
    }

    /// Names of every file currently in the assets root.
    pub fn stored_files(&self) -> Vec<String> {
        match std::fs::read_dir(self.assets_root()) {
            Ok(entries) => entries
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.state
            .auth
            .make_token(user_id, Duration::hours(1))
            .unwrap()
    }

    pub async fn seed_video(&self, owner: Uuid) -> Video {
        let video = Video::new(owner, "Test video", "seeded by tests");
        self.state.videos.create_video(&video).await.unwrap();
        video
    }

    pub async fn seed_video_with_id(&self, id: Uuid, owner: Uuid) -> Video {
        let mut video = Video::new(owner, "Test video", "seeded by tests");
        video.id = id;
        self.state.videos.create_video(&video).await.unwrap();
        video
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Encode a single-part multipart body; returns the boundary and the bytes.
pub(crate) fn multipart_body(field: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"upload.bin\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    (BOUNDARY.to_string(), body)
}

pub(crate) fn multipart_request(
    video_id: &str,
    token: Option<&str>,
    boundary: &str,
    body: Vec<u8>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/thumbnail_upload/{video_id}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::CONTENT_LENGTH, body.len());
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

/// A `thumbnail` upload of `data` declared as `content_type`.
pub(crate) fn upload_request(
    video_id: &str,
    token: Option<&str>,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let (boundary, body) = multipart_body("thumbnail", content_type, data);
    multipart_request(video_id, token, &boundary, body)
}

pub(crate) async fn response_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
