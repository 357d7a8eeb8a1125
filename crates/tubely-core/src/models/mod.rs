//! Data models for the application

mod media;
mod video;

pub use media::{AspectRatio, AssetKind};
pub use video::Video;
