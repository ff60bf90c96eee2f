pub mod asset_handlers;
pub mod health_handlers;
pub mod thumbnail_handlers;
pub mod video_handlers;

#[cfg(test)]
pub(crate) mod test_support;
