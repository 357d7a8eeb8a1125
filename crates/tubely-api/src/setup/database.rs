//! Video record store setup

use anyhow::Result;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};

/// Postgres when `DATABASE_URL` is set, otherwise a process-local store
pub async fn setup_video_repository(config: &Config) -> Result<Arc<dyn VideoRepository>> {
    match config.database_url() {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let pool = tubely_db::connect(url).await?;
            Ok(Arc::new(PgVideoRepository::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; video records are kept in memory");
            Ok(Arc::new(InMemoryVideoRepository::new()))
        }
    }
}
