//! Job execution pipeline.
//!
//! Drives one job through download → checksum → transcode → upload → sign
//! → notify. The workspace is a scoped temp directory removed on every
//! exit path, and the failure path sends at most one failure notification
//! per job, guarded by a one-shot latch.

use std::time::Duration;

use tracing::{info, warn};
use vgif_media::Transcode;
use vgif_models::{ChecksumEvent, JobSpec, Notification};
use vgif_storage::ObjectStore;

use crate::checksum::{self, ChecksumOutcome};
use crate::error::{WorkerError, WorkerResult};
use crate::notify::Notifier;

const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);
const GIF_CONTENT_TYPE: &str = "image/gif";

/// Executes exactly one job, then is consumed.
pub struct JobRunner<S, T> {
    spec: JobSpec,
    store: S,
    transcoder: T,
    notifier: Notifier,
    /// One-shot latch: set the instant any failure-notification attempt
    /// is made, so the nested notify-failure path and the top-level
    /// handler never both send.
    failure_notified: bool,
}

impl<S: ObjectStore, T: Transcode> JobRunner<S, T> {
    pub fn new(spec: JobSpec, store: S, transcoder: T, notifier: Notifier) -> Self {
        Self {
            spec,
            store,
            transcoder,
            notifier,
            failure_notified: false,
        }
    }

    /// Run the job to completion.
    ///
    /// On success the completed payload (also printed to stdout) is
    /// returned. On failure the originating error is returned after one
    /// best-effort failure notification.
    pub async fn run(mut self) -> WorkerResult<Notification> {
        let result = self.execute().await;
        if let Err(ref err) = result {
            self.notify_failure(err).await;
        }
        result
    }

    async fn execute(&mut self) -> WorkerResult<Notification> {
        info!(job_id = %self.spec.id, "Starting conversion job");

        // The workspace lives for exactly the download..sign stages; its
        // drop removes it and everything in it on both branches.
        let download_url = {
            let workspace = tempfile::tempdir()?;
            let source_path = workspace.path().join("source");
            let target_path = workspace.path().join("target.gif");

            let bytes = self
                .store
                .download_file(&self.spec.source_key, &source_path)
                .await?;
            info!(job_id = %self.spec.id, bytes, "Source downloaded");

            let outcome =
                checksum::verify(&source_path, self.spec.source_sha256.as_deref()).await?;
            self.emit_checksum_event(&outcome)?;

            self.transcoder.convert(&source_path, &target_path).await?;

            self.store
                .upload_file(&target_path, &self.spec.target_key, GIF_CONTENT_TYPE)
                .await?;

            self.store
                .presign_get(&self.spec.target_key, SIGNED_URL_TTL)
                .await?
        };

        let payload = Notification::completed(
            self.spec.id.clone(),
            download_url,
            self.spec.target_key.clone(),
        );

        // A failed success notification becomes the job's error, itself
        // reported by one (and only one) failure notification.
        if let Err(notify_err) = self
            .notifier
            .notify(self.spec.callback_url.as_deref(), &payload)
            .await
        {
            let err = WorkerError::Notify(notify_err);
            self.notify_failure(&err).await;
            return Err(err);
        }

        println!("{}", serde_json::to_string(&payload)?);
        info!(job_id = %self.spec.id, "Job completed");
        Ok(payload)
    }

    fn emit_checksum_event(&self, outcome: &ChecksumOutcome) -> WorkerResult<()> {
        let event = match outcome {
            ChecksumOutcome::Verified { sha256, size } => ChecksumEvent::SourceChecksumVerified {
                job_id: self.spec.id.clone(),
                source_key: self.spec.source_key.clone(),
                sha256: sha256.clone(),
                size: *size,
            },
            ChecksumOutcome::Skipped { size } => ChecksumEvent::SourceChecksumUnavailable {
                job_id: self.spec.id.clone(),
                source_key: self.spec.source_key.clone(),
                size: *size,
            },
        };
        println!("{}", serde_json::to_string(&event)?);
        Ok(())
    }

    /// Send the failure payload at most once per job; the attempt's own
    /// failure is logged and suppressed.
    async fn notify_failure(&mut self, err: &WorkerError) {
        if self.failure_notified {
            return;
        }
        self.failure_notified = true;

        let payload = Notification::failed(self.spec.id.clone(), err.to_string());
        if let Err(notify_err) = self
            .notifier
            .notify(self.spec.callback_url.as_deref(), &payload)
            .await
        {
            warn!(job_id = %self.spec.id, "Failure notification not delivered: {notify_err}");
        }
    }
}
