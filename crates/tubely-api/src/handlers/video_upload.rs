use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::VideoId;
use crate::services::upload::{declared_length, UploadService};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::Video;

#[utoipa::path(
    put,
    path = "/api/videos/{video_id}/video",
    tag = "videos",
    params(
        ("video_id" = uuid::Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "MP4 file in the `video` field"),
    responses(
        (status = 200, description = "Video stored under its aspect-ratio prefix and record updated", body = Video),
        (status = 400, description = "Invalid ID, malformed form or not an MP4", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 411, description = "Content-Length not declared", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Probe, storage or record update failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    VideoId(video_id): VideoId,
    user: AuthUser,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video = UploadService::new(&state)
        .upload_video(user.user_id, video_id, declared_length(&headers), multipart)
        .await?;

    Ok(Json(video))
}
