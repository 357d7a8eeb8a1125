//! Request extractors shared by handlers

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tubely_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;

/// The `{video_id}` path segment parsed as a UUID
///
/// Runs before authentication so a malformed ID is reported as such.
#[derive(Debug, Clone, Copy)]
pub struct VideoId(pub Uuid);

impl<S> FromRequestParts<S> for VideoId
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidId(rejection.body_text()))?;

        Uuid::parse_str(&raw)
            .map(VideoId)
            .map_err(|_| HttpAppError(AppError::InvalidId(raw)))
    }
}
