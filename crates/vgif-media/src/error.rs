//! Error types for media operations.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during transcoding.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    /// `output` is the combined stdout/stderr of the ffmpeg invocation,
    /// kept verbatim: it is the only diagnostic surface operators get.
    #[error("ffmpeg conversion failed with code {exit_code}: {output}")]
    FfmpegFailed { exit_code: i32, output: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
