use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::{Bytes, BytesMut};
use std::sync::Arc;

use crate::api::response::{ApiError, AppQuery};
use crate::store::{Resource, ResourceQuery, ResourceStore};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

/// A decoded upload form: named, typed fields collected once at the
/// boundary, before any storage work happens.
#[derive(Debug, Default)]
struct ResourceSubmission {
    title: String,
    description: String,
    kind: String,
    tags: Vec<String>,
    url: String,
    /// Client-supplied filename, exactly as submitted
    file_name: Option<String>,
    file_data: Option<Bytes>,
}

impl ResourceSubmission {
    /// A file part with an empty filename means no file was selected.
    fn has_file(&self) -> bool {
        self.file_name.as_deref().is_some_and(|n| !n.is_empty()) && self.file_data.is_some()
    }

    /// Build the catalog entry. An empty title falls back to the client's
    /// original filename when a file was attached.
    fn into_resource(self, stored_file: Option<String>) -> Resource {
        let title = if self.title.is_empty() && self.has_file() {
            self.file_name.clone().unwrap_or_default()
        } else {
            self.title
        };

        Resource {
            title,
            description: self.description,
            kind: self.kind,
            tags: self.tags,
            url: self.url,
            file: stored_file,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<ResourceQuery>,
) -> Json<Vec<Resource>> {
    let resources = state.store.load_all().await;
    Json(ResourceStore::filter(resources, &query))
}

pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let submission = decode_submission(multipart, state.config.max_upload_size).await?;

    let stored_file = if submission.has_file() {
        let original_name = submission.file_name.as_deref().unwrap_or_default();
        let data = submission.file_data.clone().unwrap_or_default();
        let stored = state
            .uploads
            .store(original_name, data)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to store upload: {e}")))?;
        Some(stored)
    } else {
        None
    };

    let resource = submission.into_resource(stored_file);

    state
        .store
        .append(resource.clone())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to persist resource: {e}")))?;

    tracing::debug!(title = %resource.title, "Created resource");

    Ok((StatusCode::CREATED, Json(resource)))
}

// ============================================================================
// Helpers
// ============================================================================

async fn decode_submission(
    mut multipart: Multipart,
    max_upload_size: u64,
) -> Result<ResourceSubmission, ApiError> {
    let mut submission = ResourceSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => {
                submission.title = text_field(field, "title").await?;
            }
            "description" => {
                submission.description = text_field(field, "description").await?;
            }
            "type" => {
                submission.kind = text_field(field, "type").await?;
            }
            "tags" => {
                submission.tags = parse_tags(&text_field(field, "tags").await?);
            }
            "url" => {
                submission.url = text_field(field, "url").await?;
            }
            "file" => {
                submission.file_name = field.file_name().map(|s| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;

                if data.len() as u64 > max_upload_size {
                    return Err(ApiError::payload_too_large(format!(
                        "File exceeds maximum upload size of {max_upload_size} bytes"
                    )));
                }

                let mut buf = BytesMut::with_capacity(data.len());
                buf.extend_from_slice(&data);
                submission.file_data = Some(buf.freeze());
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    Ok(submission)
}

async fn text_field(field: Field<'_>, name: &str) -> Result<String, ApiError> {
    let text = field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid {name}: {e}")))?;
    Ok(text.trim().to_string())
}

/// Comma-separated labels, trimmed, empty segments discarded.
fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission_with_file(title: &str, file_name: &str) -> ResourceSubmission {
        ResourceSubmission {
            title: title.to_string(),
            file_name: Some(file_name.to_string()),
            file_data: Some(Bytes::from_static(b"payload")),
            ..Default::default()
        }
    }

    #[test]
    fn parse_tags_splits_and_trims() {
        assert_eq!(
            parse_tags("solar, energy ,wind"),
            vec!["solar", "energy", "wind"]
        );
        assert_eq!(parse_tags("solar,,  ,"), vec!["solar"]);
        assert_eq!(parse_tags(""), Vec::<String>::new());
    }

    #[test]
    fn empty_title_falls_back_to_original_filename() {
        let resource =
            submission_with_file("", "plan.pdf").into_resource(Some("plan.pdf".to_string()));
        assert_eq!(resource.title, "plan.pdf");
        assert_eq!(resource.file, Some("plan.pdf".to_string()));
    }

    #[test]
    fn supplied_title_wins_over_filename() {
        let resource =
            submission_with_file("My Plan", "plan.pdf").into_resource(Some("plan_1.pdf".to_string()));
        assert_eq!(resource.title, "My Plan");
        assert_eq!(resource.file, Some("plan_1.pdf".to_string()));
    }

    #[test]
    fn no_file_keeps_title_empty() {
        let resource = ResourceSubmission::default().into_resource(None);
        assert_eq!(resource.title, "");
        assert_eq!(resource.file, None);
    }
}
