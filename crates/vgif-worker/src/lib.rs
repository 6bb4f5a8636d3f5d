//! Single-shot video to GIF conversion worker.
//!
//! One process invocation handles one job: download the source video from
//! OBS, optionally verify its checksum, transcode it to an animated GIF,
//! upload the result, sign a download URL, and report the outcome to an
//! optional callback endpoint.

pub mod checksum;
pub mod config;
pub mod error;
pub mod notify;
pub mod runner;

pub use checksum::ChecksumOutcome;
pub use error::{WorkerError, WorkerResult};
pub use notify::{Notifier, NotifyError, NotifyOutcome};
pub use runner::JobRunner;
