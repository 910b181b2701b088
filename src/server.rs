//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::GeneratorService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub generator: Arc<GeneratorService>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: Arc<AppConfig>) -> AppState {
    let generator = Arc::new(GeneratorService::new(config.master_size));
    AppState { config, generator }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/cover", post(handle_cover))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/palettes", get(api::handle_palettes))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_cover(
    axum::extract::State(state): axum::extract::State<AppState>,
    body: axum::Json<api::CoverRequest>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_cover(
        axum::extract::State(state.config),
        axum::extract::State(state.generator),
        body,
    )
    .await
}

async fn handle_analyze(
    axum::extract::State(state): axum::extract::State<AppState>,
    body: axum::Json<api::AnalyzeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    api::handle_analyze(axum::extract::State(state.generator), body).await
}
