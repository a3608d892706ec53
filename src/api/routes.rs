use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    Router::new()
        // Pages
        .route("/", get(handlers::home_page))
        .route("/upload", get(handlers::upload_page))
        .route("/resources", get(handlers::resources_page))
        // REST API
        .route("/api/resources", get(handlers::list_resources))
        .route(
            "/api/upload",
            post(handlers::create_resource).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Assets and uploaded files
        .route("/static/*path", get(handlers::serve_asset))
        .route("/uploads/*path", get(handlers::serve_upload))
        // Internal
        .route("/_internal/health", get(handlers::health))
        // Allow CORS for frontend fetch calls
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
