//! Image formats accepted as video thumbnails.

use uuid::Uuid;

/// One of the two thumbnail encodings the asset store accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbnailFormat {
    Jpeg,
    Png,
}

impl ThumbnailFormat {
    /// Resolve a declared content type against the allow-list.
    ///
    /// Matching is an exact string comparison: `image/jpg`, upper-case
    /// variants or values carrying parameters are all rejected.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Resolve a stored file extension (including the leading dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".jpg" => Some(Self::Jpeg),
            ".png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Canonical file extension, including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// File name of the thumbnail asset for `video_id`.
    pub fn file_name(self, video_id: Uuid) -> String {
        format!("{}{}", video_id, self.extension())
    }

    /// Parse an asset file name of the form `<uuid><extension>`.
    pub fn parse_file_name(name: &str) -> Option<(Uuid, Self)> {
        let dot = name.rfind('.')?;
        let (stem, extension) = name.split_at(dot);
        let format = Self::from_extension(extension)?;
        let video_id = Uuid::parse_str(stem).ok()?;
        // Reject non-canonical spellings such as braced or upper-case UUIDs.
        if video_id.to_string() != stem {
            return None;
        }
        Some((video_id, format))
    }
}
