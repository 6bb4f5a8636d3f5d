//! Worker error types.

use thiserror::Error;

use crate::notify::NotifyError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Missing required environment variable: {0}")]
    Config(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidConfig { var: String, message: String },

    #[error("Downloaded object checksum mismatch. Expected {expected}, got {actual}.")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Storage error: {0}")]
    Storage(#[from] vgif_storage::StorageError),

    #[error("Media error: {0}")]
    Media(#[from] vgif_media::MediaError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn config(var: impl Into<String>) -> Self {
        Self::Config(var.into())
    }

    pub fn invalid_config(var: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            var: var.into(),
            message: message.into(),
        }
    }
}
