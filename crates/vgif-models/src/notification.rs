//! Callback notification payloads.

use serde::{Deserialize, Serialize};

use crate::job::JobId;

/// Terminal outcome reported to the callback endpoint.
///
/// Exactly one of these is delivered (at most once) per job: `Completed`
/// on success, `Failed` on any failure. The same `Completed` value is also
/// printed to stdout as the process's success line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    Completed {
        job_id: JobId,
        download_url: String,
        target_key: String,
    },
    #[serde(rename_all = "camelCase")]
    Failed { job_id: JobId, error_message: String },
}

impl Notification {
    pub fn completed(
        job_id: JobId,
        download_url: impl Into<String>,
        target_key: impl Into<String>,
    ) -> Self {
        Self::Completed {
            job_id,
            download_url: download_url.into(),
            target_key: target_key.into(),
        }
    }

    pub fn failed(job_id: JobId, error_message: impl Into<String>) -> Self {
        Self::Failed {
            job_id,
            error_message: error_message.into(),
        }
    }

    /// The job this notification is about.
    pub fn job_id(&self) -> &JobId {
        match self {
            Self::Completed { job_id, .. } | Self::Failed { job_id, .. } => job_id,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
