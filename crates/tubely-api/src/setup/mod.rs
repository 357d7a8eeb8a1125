//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded `Config` to a ready router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_processing::{AspectRatioClassifier, FfprobeProbe};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.base.environment,
        "Configuration loaded and validated successfully"
    );

    let videos = database::setup_video_repository(&config).await?;

    let persister = storage::setup_storage(&config).await?;

    let probe = FfprobeProbe::new(config.uploads.ffprobe_path.clone())
        .context("Invalid FFPROBE_PATH")?;
    let classifier = AspectRatioClassifier::new(Arc::new(probe));

    let state = Arc::new(AppState::new(config.clone(), videos, persister, classifier));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
