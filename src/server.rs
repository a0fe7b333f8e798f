//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::ServerConfig;
use crate::services::ImageProcessor;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub processor: ImageProcessor,
    pub jpeg_quality: u8,
    pub max_upload_bytes: usize,
}

/// Create application state from configuration.
pub fn create_app_state(config: &ServerConfig) -> AppState {
    tracing::info!(
        workers = config.workers,
        timeout_secs = config.request_timeout_secs,
        max_upload_bytes = config.max_upload_bytes,
        jpeg_quality = config.jpeg_quality,
        "Worker pool configured"
    );

    AppState {
        processor: ImageProcessor::new(config.workers, config.request_timeout()),
        jpeg_quality: config.jpeg_quality,
        max_upload_bytes: config.max_upload_bytes,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes;

    Router::new()
        .route("/process", post(api::handle_process))
        .route("/process-original", post(api::handle_process_original))
        .route("/download-array", post(api::handle_download_array))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
}
