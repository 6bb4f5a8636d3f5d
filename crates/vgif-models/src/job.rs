//! Job description for one conversion run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a job.
///
/// The identifier is opaque: it is handed to the worker by whoever
/// scheduled the job and is echoed back verbatim in every payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the worker needs to know about the one job it will run.
///
/// Constructed once from the environment at process start and never
/// mutated afterwards; the process lifetime is the job lifetime.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// Unique job ID
    pub id: JobId,
    /// Object key of the source video
    pub source_key: String,
    /// Object key the produced GIF is uploaded under
    pub target_key: String,
    /// Callback endpoint for the terminal outcome; absent means the
    /// notification stages are no-ops
    pub callback_url: Option<String>,
    /// Expected SHA-256 of the source object; absent means the integrity
    /// check is skipped
    pub source_sha256: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_roundtrip() {
        let id = JobId::from_string("job-42");
        assert_eq!(id.as_str(), "job-42");
        assert_eq!(id.to_string(), "job-42");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"job-42\"");
    }
}
