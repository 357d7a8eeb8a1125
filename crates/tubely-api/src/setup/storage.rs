//! Storage setup and initialization

use anyhow::{Context, Result};
use tubely_core::Config;
use tubely_storage::{create_thumbnail_storage, create_video_storage};

use crate::services::upload::AssetPersister;

/// Build the thumbnail and video stores selected by the configuration
pub async fn setup_storage(config: &Config) -> Result<AssetPersister> {
    tracing::info!("Initializing storage...");

    let thumbnails = create_thumbnail_storage(config)
        .await
        .context("Failed to initialize thumbnail storage")?;
    let videos = create_video_storage(config)
        .await
        .context("Failed to initialize video storage")?;

    tracing::info!(
        thumbnails = %thumbnails.backend_type(),
        videos = %videos.backend_type(),
        "Storage initialized successfully"
    );

    Ok(AssetPersister::new(thumbnails, videos))
}
