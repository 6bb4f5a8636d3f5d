//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Missing required environment variable: {0}")]
    Config(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Failed to download object {key}: {message}")]
    DownloadFailed { key: String, message: String },

    #[error("Failed to upload object {key}: {message}")]
    UploadFailed { key: String, message: String },

    #[error("Failed to sign download URL for {key}: {message}")]
    PresignFailed { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn config(var: impl Into<String>) -> Self {
        Self::Config(var.into())
    }

    pub fn download_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn upload_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UploadFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn presign_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PresignFailed {
            key: key.into(),
            message: message.into(),
        }
    }
}
