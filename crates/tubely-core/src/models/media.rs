use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Kind of asset attached to a video record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Thumbnail,
    Video,
}

impl AssetKind {
    /// Multipart field that carries the file
    pub fn form_field(&self) -> &'static str {
        match self {
            AssetKind::Thumbnail => "thumbnail",
            AssetKind::Video => "video",
        }
    }

    /// Sniffed MIME types accepted for this kind
    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            AssetKind::Thumbnail => &["image/png", "image/jpeg"],
            AssetKind::Video => &["video/mp4"],
        }
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        self.allowed_content_types().contains(&content_type)
    }
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.form_field())
    }
}

/// Aspect-ratio bucket of a video, used as its storage key prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    /// Approximately 16:9
    Wide,
    /// Approximately 9:16
    Tall,
    Other,
}

impl AspectRatio {
    pub fn key_prefix(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "wide",
            AspectRatio::Tall => "tall",
            AspectRatio::Other => "other",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.key_prefix())
    }
}
