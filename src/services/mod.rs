pub mod asset_store;
pub mod auth_service;
pub mod video_service;
