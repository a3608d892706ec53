//! knowledge-bank - A minimal resource catalog server for sustainability resources
//!
//! This crate provides a small REST API plus static page serving with:
//! - A flat JSON file as the backing store, re-read on every request
//! - Linear, case-insensitive filtering over title/description, type and tags
//! - Multipart uploads persisted under collision-avoided filenames
//! - No authentication, indexing, or pagination

pub mod api;
pub mod config;
pub mod store;
pub mod upload;

use config::Config;
use store::ResourceStore;
use upload::UploadSink;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub store: ResourceStore,
    pub uploads: UploadSink,
}
