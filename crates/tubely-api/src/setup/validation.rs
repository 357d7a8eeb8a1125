//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::{Context, Result};
use tubely_core::Config;

/// Validate critical configuration values
///
/// Runs [`Config::validate`] and then checks what only makes sense on the host the server
/// starts on.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let staging_dir = &config.uploads.staging_dir;
    std::fs::create_dir_all(staging_dir).with_context(|| {
        format!(
            "STAGING_DIR {} does not exist and cannot be created",
            staging_dir.display()
        )
    })?;

    if config.uploads.max_video_bytes < config.uploads.max_thumbnail_bytes {
        tracing::warn!(
            max_video_bytes = config.uploads.max_video_bytes,
            max_thumbnail_bytes = config.uploads.max_thumbnail_bytes,
            "Video size limit is smaller than the thumbnail limit"
        );
    }

    Ok(())
}
