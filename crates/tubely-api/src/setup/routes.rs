//! Route configuration and setup

mod health;

use crate::api_doc;
use crate::constants::{API_PREFIX, ASSETS_ROUTE};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let limits = state.uploads.limits;

    // Per-route limits bound the multipart stream; the outer layer turns away bodies that
    // declare more than any route accepts before a handler runs.
    let upload_routes = Router::new()
        .route(
            &format!("{}/videos/{{video_id}}/thumbnail", API_PREFIX),
            put(handlers::thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(limits.max_thumbnail_bytes)),
        )
        .route(
            &format!("{}/videos/{{video_id}}/video", API_PREFIX),
            put(handlers::video_upload::upload_video)
                .layer(DefaultBodyLimit::max(limits.max_video_bytes)),
        );

    let read_routes = Router::new()
        .route(
            &format!("{}/videos/{{video_id}}", API_PREFIX),
            get(handlers::video_get::get_video),
        )
        .route(
            &format!("{}/thumbnails/{{video_id}}", API_PREFIX),
            get(handlers::thumbnail_get::get_thumbnail),
        )
        .route(
            &format!("{}/openapi.json", API_PREFIX),
            get(|| async { Json(api_doc::get_openapi_spec()) }),
        )
        .route("/health", get(health::health_check));

    let app = upload_routes
        .merge(read_routes)
        .with_state(state)
        .nest_service(ASSETS_ROUTE, ServeDir::new(&config.storage.assets_root))
        .layer(RequestBodyLimitLayer::new(limits.largest()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::PUT, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
