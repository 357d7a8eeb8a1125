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
    path = "/api/videos/{video_id}/thumbnail",
    tag = "videos",
    params(
        ("video_id" = uuid::Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "File in the `thumbnail` field"),
    responses(
        (status = 200, description = "Thumbnail stored and video updated", body = Video),
        (status = 400, description = "Invalid ID, malformed form or unsupported type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    VideoId(video_id): VideoId,
    user: AuthUser,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video = UploadService::new(&state)
        .upload_thumbnail(user.user_id, video_id, declared_length(&headers), multipart)
        .await?;

    Ok(Json(video))
}
