//! Core data models for the thumbnail service.
//!
//! `Video` maps to the `videos` table via `sqlx::FromRow` and is the JSON
//! body returned by the API. `ThumbnailFormat` is the storage allow-list.

pub mod thumbnail;
pub mod video;
