use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::VideoId;
use crate::state::UploadState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

/// Serve a thumbnail held by the in-memory store
#[utoipa::path(
    get,
    path = "/api/thumbnails/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = uuid::Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes"),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Thumbnail not found", body = ErrorResponse)
    )
)]
pub async fn get_thumbnail(
    State(uploads): State<UploadState>,
    VideoId(video_id): VideoId,
) -> Result<Response, HttpAppError> {
    let object = uploads
        .persister
        .thumbnails()
        .download(&video_id.to_string())
        .await?;

    let content_type = object
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        object.data,
    )
        .into_response())
}
