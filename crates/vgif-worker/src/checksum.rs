//! Source integrity verification.

use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use crate::error::{WorkerError, WorkerResult};

const CHUNK_SIZE: usize = 1024 * 1024;

/// Result of the checksum stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumOutcome {
    /// No expected digest was configured; size reported for diagnostics.
    Skipped { size: u64 },
    /// Expected digest matched the downloaded bytes.
    Verified { sha256: String, size: u64 },
}

impl ChecksumOutcome {
    pub fn size(&self) -> u64 {
        match self {
            Self::Skipped { size } | Self::Verified { size, .. } => *size,
        }
    }
}

/// Verify the file at `path` against an optionally supplied SHA-256.
///
/// A mismatch is fatal; absence of an expected digest skips the hash
/// entirely. Hex comparison is case-insensitive.
pub async fn verify(path: &Path, expected: Option<&str>) -> WorkerResult<ChecksumOutcome> {
    let size = tokio::fs::metadata(path).await?.len();

    let Some(expected) = expected else {
        return Ok(ChecksumOutcome::Skipped { size });
    };

    let actual = compute_sha256(path).await?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(WorkerError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(ChecksumOutcome::Verified {
        sha256: actual,
        size,
    })
}

/// SHA-256 of a whole file, read in fixed-size chunks.
pub async fn compute_sha256(path: &Path) -> WorkerResult<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
