//! HTTP layer: routing, upload handling and static files.
//!
//! All image work is delegated to [`UploadPipeline`]; handlers only move
//! bytes in and pages out.

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use exifview_core::{Config, UploadPipeline};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod pages;
pub mod routes;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub pipeline: Arc<UploadPipeline>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let pipeline = UploadPipeline::new(&config);
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let body_limit = ctx.config.limits.max_upload_bytes();
    let previews =
        ServeDir::new(ctx.pipeline.storage_dir()).not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(routes::index))
        .route("/upload", post(routes::upload))
        .nest_service("/temp", previews)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Page Not Found")
}
