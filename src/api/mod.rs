use std::path::Path;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::engine::ComputationEngine;

mod check;

/// Shared by every request. The engine is read-only, requests share no mutable state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) engine: Arc<dyn ComputationEngine>,
}

pub(crate) fn router(state: AppState, static_dir: &Path, max_body_bytes: usize) -> Router {
    let api_router = Router::new()
        .route("/check", post(check::handle_check_request))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state);

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(api_router)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> StatusCode {
    StatusCode::OK
}
