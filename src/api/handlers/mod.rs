mod admin;
mod content;
mod pages;
mod resources;

pub use admin::health;
pub use content::{serve_asset, serve_upload};
pub use pages::{home_page, resources_page, upload_page};
pub use resources::{create_resource, list_resources};
