//! FFmpeg CLI wrapper for the vgif worker.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with combined-output capture
//! - The fixed GIF recipe (palette generation + application) behind the
//!   [`Transcode`] seam, with single-pass and two-pass strategies

pub mod command;
pub mod error;
pub mod gif;

pub use command::{check_ffmpeg, run_ffmpeg, FfmpegCommand};
pub use error::{MediaError, MediaResult};
pub use gif::{GifTranscoder, PaletteStrategy, Transcode};
