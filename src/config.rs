use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Maximum upload size in bytes
    pub max_upload_size: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// JSON file holding the full resource catalog
    pub data_file: PathBuf,
    /// Directory for uploaded files, flat namespace
    pub upload_dir: PathBuf,
    /// Directory for CSS/JS assets served under /static
    pub static_dir: PathBuf,
    /// Directory holding the HTML pages
    pub page_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./data.json"),
            upload_dir: PathBuf::from("./uploads"),
            static_dir: PathBuf::from("./static"),
            page_dir: PathBuf::from("./templates"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let data_file = std::env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data.json"));

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./static"));

        let page_dir = std::env::var("PAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let max_upload_size = std::env::var("MAX_UPLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(50 * 1024 * 1024); // 50MB

        let config = Config {
            server: ServerConfig { port },
            storage: StorageConfig {
                data_file,
                upload_dir,
                static_dir,
                page_dir,
            },
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "DATA_FILE cannot be empty".to_string(),
            ));
        }

        if self.storage.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "UPLOAD_DIR cannot be empty".to_string(),
            ));
        }

        if self.max_upload_size == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_UPLOAD_SIZE must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
