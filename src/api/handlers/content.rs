use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::response::ApiError;
use crate::AppState;

/// Serve a CSS/JS asset.
/// Route: GET /static/*path
pub async fn serve_asset(
    State(state): State<Arc<AppState>>,
    axum::extract::Path(path): axum::extract::Path<String>,
) -> Result<Response, ApiError> {
    serve_from(&state.config.storage.static_dir, &path).await
}

/// Serve an uploaded file.
/// Route: GET /uploads/*path
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    axum::extract::Path(path): axum::extract::Path<String>,
) -> Result<Response, ApiError> {
    serve_from(&state.config.storage.upload_dir, &path).await
}

/// Stream a file from `dir`, refusing any path that would escape it.
async fn serve_from(dir: &Path, request_path: &str) -> Result<Response, ApiError> {
    let file_path = resolve(dir, request_path).ok_or_else(|| ApiError::not_found("Not Found"))?;

    let file = match tokio::fs::File::open(&file_path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ApiError::not_found("Not Found"));
        }
        Err(e) => return Err(ApiError::internal(format!("Failed to open file: {e}"))),
    };

    let metadata = file
        .metadata()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read file metadata: {e}")))?;
    if metadata.is_dir() {
        return Err(ApiError::not_found("Not Found"));
    }

    let content_type = mime_guess::from_path(&file_path)
        .first_or_octet_stream()
        .to_string();

    let body = Body::from_stream(ReaderStream::new(file));
    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        content_type
            .parse()
            .unwrap_or(header::HeaderValue::from_static("application/octet-stream")),
    );

    headers.insert(
        header::CONTENT_LENGTH,
        header::HeaderValue::from(metadata.len()),
    );

    Ok(response)
}

/// Join `request_path` under `dir`, rejecting any segment that is not a
/// plain name (`..`, absolute paths, drive prefixes).
fn resolve(dir: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path);
    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_plain_names() {
        let base = Path::new("/srv/static");
        assert_eq!(
            resolve(base, "css/style.css"),
            Some(PathBuf::from("/srv/static/css/style.css"))
        );
    }

    #[test]
    fn resolve_rejects_escaping_paths() {
        let base = Path::new("/srv/static");
        assert_eq!(resolve(base, "../data.json"), None);
        assert_eq!(resolve(base, "css/../../data.json"), None);
        assert_eq!(resolve(base, "/etc/passwd"), None);
    }
}
