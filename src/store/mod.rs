mod catalog;
pub mod models;

pub use catalog::{ResourceStore, StoreError};
pub use models::{Resource, ResourceQuery};
