use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::VideoId;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tubely_core::{AppError, Video};

#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = uuid::Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video record", body = Video),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    VideoId(video_id): VideoId,
) -> Result<Json<Video>, HttpAppError> {
    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    Ok(Json(video))
}
