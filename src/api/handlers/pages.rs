use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::io::ErrorKind;
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::AppState;

/// Route: GET /
pub async fn home_page(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    serve_page(&state, "index.html").await
}

/// Route: GET /upload
pub async fn upload_page(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    serve_page(&state, "upload.html").await
}

/// Route: GET /resources
pub async fn resources_page(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    serve_page(&state, "resources.html").await
}

async fn serve_page(state: &AppState, name: &str) -> Result<Response, ApiError> {
    let path = state.config.storage.page_dir.join(name);

    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ApiError::not_found("Not Found"));
        }
        Err(e) => return Err(ApiError::internal(format!("Failed to read page: {e}"))),
    };

    let mut response = (StatusCode::OK, data).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html; charset=utf-8"),
    );

    Ok(response)
}
