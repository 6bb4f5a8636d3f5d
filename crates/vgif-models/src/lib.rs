//! Shared domain types for the vgif conversion worker.
//!
//! This crate holds the job description loaded at process start and the
//! JSON wire shapes the worker emits: the callback notification payloads
//! and the checksum diagnostic events printed to stdout.

pub mod event;
pub mod job;
pub mod notification;

pub use event::ChecksumEvent;
pub use job::{JobId, JobSpec};
pub use notification::Notification;
