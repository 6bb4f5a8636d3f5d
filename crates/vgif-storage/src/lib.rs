//! Object storage client for the vgif worker.
//!
//! Wraps download, upload, and signed-URL issuance against a Huawei OBS
//! bucket through the S3 API. The [`ObjectStore`] trait is the seam the
//! job runner depends on.

pub mod client;
pub mod error;

pub use client::{ObjectStore, ObsClient, ObsConfig};
pub use error::{StorageError, StorageResult};
