//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tubely_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video hosting API. Owners attach a thumbnail and an MP4 to each video record; videos are stored under a prefix named after their aspect ratio."
    ),
    paths(
        // Videos
        handlers::video_get::get_video,
        handlers::video_upload::upload_video,
        // Thumbnails
        handlers::thumbnail_upload::upload_thumbnail,
        handlers::thumbnail_get::get_thumbnail,
    ),
    components(
        schemas(
            models::Video,
            models::AssetKind,
            models::AspectRatio,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video records and their uploads"),
        (name = "thumbnails", description = "Thumbnails held in memory")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
