use serde::{Deserialize, Serialize};

/// A single catalog entry. Resources have no identifier beyond their
/// position in the stored sequence, and are never mutated once created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-text category label; `type` on the wire.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: String,
    /// On-disk name of an attached upload, if any. A non-owning reference
    /// into the upload directory; nothing checks it stays valid.
    #[serde(default)]
    pub file: Option<String>,
}

/// Optional listing predicates; a kept resource must match all of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    /// Substring search over title and description
    #[serde(default)]
    pub q: Option<String>,
    /// Exact category match
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Tag membership match
    #[serde(default)]
    pub tag: Option<String>,
}

impl ResourceQuery {
    /// All matching is case-insensitive. An absent or blank parameter
    /// imposes no filtering for its dimension.
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(term) = active(&self.q) {
            let term = term.to_lowercase();
            if !resource.title.to_lowercase().contains(&term)
                && !resource.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(kind) = active(&self.kind) {
            if resource.kind.to_lowercase() != kind.to_lowercase() {
                return false;
            }
        }

        if let Some(tag) = active(&self.tag) {
            let tag = tag.to_lowercase();
            if !resource.tags.iter().any(|t| t.to_lowercase() == tag) {
                return false;
            }
        }

        true
    }
}

fn active(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|v| !v.is_empty())
}
