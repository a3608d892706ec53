mod sink;

pub use sink::UploadSink;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
