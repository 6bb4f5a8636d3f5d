//! Diagnostic events printed to stdout after the download stage.
//!
//! These lines are observability only; consumers must not depend on them
//! for correctness.

use serde::{Deserialize, Serialize};

use crate::job::JobId;

/// Result of the source checksum stage, one line of JSON on stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChecksumEvent {
    /// An expected digest was supplied and matched the downloaded bytes.
    #[serde(rename_all = "camelCase")]
    SourceChecksumVerified {
        job_id: JobId,
        source_key: String,
        sha256: String,
        size: u64,
    },
    /// No expected digest was supplied; only the size is reported.
    #[serde(rename_all = "camelCase")]
    SourceChecksumUnavailable {
        job_id: JobId,
        source_key: String,
        size: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tags() {
        let verified = ChecksumEvent::SourceChecksumVerified {
            job_id: JobId::from_string("j"),
            source_key: "in/a.mp4".into(),
            sha256: "ab".repeat(32),
            size: 1024,
        };
        let value = serde_json::to_value(&verified).unwrap();
        assert_eq!(value["event"], "source_checksum_verified");
        assert_eq!(value["sourceKey"], "in/a.mp4");
        assert_eq!(value["size"], 1024);

        let unavailable = ChecksumEvent::SourceChecksumUnavailable {
            job_id: JobId::from_string("j"),
            source_key: "in/a.mp4".into(),
            size: 7,
        };
        let value = serde_json::to_value(&unavailable).unwrap();
        assert_eq!(value["event"], "source_checksum_unavailable");
        assert!(value.get("sha256").is_none());
    }
}
