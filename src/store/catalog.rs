use std::path::{Path, PathBuf};
use thiserror::Error;

use super::models::{Resource, ResourceQuery};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for the resource sequence.
///
/// Holds only the path of the backing JSON file; the catalog is re-read
/// from disk on every call, so no state survives across requests.
pub struct ResourceStore {
    data_file: PathBuf,
}

impl ResourceStore {
    pub fn new<P: AsRef<Path>>(data_file: P) -> Self {
        Self {
            data_file: data_file.as_ref().to_path_buf(),
        }
    }

    /// Read the entire catalog. A missing, unreadable, or unparsable
    /// backing file is an empty catalog, never an error.
    pub async fn load_all(&self) -> Vec<Resource> {
        match tokio::fs::read(&self.data_file).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Keep the resources matching every supplied predicate, preserving
    /// their input order.
    pub fn filter(resources: Vec<Resource>, query: &ResourceQuery) -> Vec<Resource> {
        resources
            .into_iter()
            .filter(|resource| query.matches(resource))
            .collect()
    }

    /// Append one resource and rewrite the whole file as indented JSON.
    ///
    /// The read-modify-write is unguarded: concurrent appends can lose an
    /// update, and a crash mid-write can truncate the file.
    pub async fn append(&self, resource: Resource) -> Result<(), StoreError> {
        let mut resources = self.load_all().await;
        resources.push(resource);
        let json = serde_json::to_vec_pretty(&resources)?;
        tokio::fs::write(&self.data_file, json).await?;
        Ok(())
    }
}
