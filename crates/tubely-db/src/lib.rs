//! Tubely DB Library
//!
//! Video record persistence. [`VideoRepository`] is the seam the upload pipeline talks to;
//! [`PgVideoRepository`] backs it with Postgres and [`InMemoryVideoRepository`] keeps records
//! in process for development and tests.

pub mod video;

pub use video::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};

use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Connect to Postgres and apply pending migrations
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database connected and migrations applied");
    Ok(pool)
}
