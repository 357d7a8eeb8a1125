//! Health check handler and response type.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Key probed in each store; it never exists
const PROBE_KEY: &str = "health-check";

/// Run an async check with timeout; returns "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, T, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(_)) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub database: String,
    pub thumbnail_storage: String,
    pub video_storage: String,
}

pub(super) async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let persister = &state.uploads.persister;
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        database: run_check(TIMEOUT, state.videos.get_video(Uuid::nil()), "unhealthy").await,
        thumbnail_storage: run_check(
            TIMEOUT,
            persister.thumbnails().exists(PROBE_KEY),
            "unhealthy",
        )
        .await,
        video_storage: run_check(TIMEOUT, persister.videos().exists(PROBE_KEY), "unhealthy")
            .await,
    };

    let healthy = [
        &response.database,
        &response.thumbnail_storage,
        &response.video_storage,
    ]
    .iter()
    .all(|check| check.as_str() == "healthy");

    if healthy {
        (StatusCode::OK, Json(response))
    } else {
        tracing::warn!(
            database = %response.database,
            thumbnail_storage = %response.thumbnail_storage,
            video_storage = %response.video_storage,
            "Health check failed"
        );
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthCheckResponse {
                status: "unhealthy".to_string(),
                ..response
            }),
        )
    }
}
