//! Shared application state handed to every handler.

use crate::services::{
    asset_store::AssetStore, auth_service::AuthService, video_service::VideoService,
};

/// Services constructed once at startup from `AppConfig`.
#[derive(Clone)]
pub struct AppState {
    pub videos: VideoService,
    pub assets: AssetStore,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(videos: VideoService, assets: AssetStore, auth: AuthService) -> Self {
        Self {
            videos,
            assets,
            auth,
        }
    }
}
