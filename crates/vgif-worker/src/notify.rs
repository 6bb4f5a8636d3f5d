//! Callback delivery.
//!
//! One POST per outcome, bounded timeout, no retry: delivery is
//! best-effort by design and callers needing reliability poll the object
//! store instead.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use vgif_models::Notification;

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(10);

pub type NotifyResult<T> = Result<T, NotifyError>;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Callback failed with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Callback request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What happened to a notification attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// No callback URL configured.
    Skipped,
    /// The endpoint accepted the payload.
    Delivered,
}

/// Delivers job outcomes to the configured callback endpoint.
pub struct Notifier {
    client: reqwest::Client,
}

impl Notifier {
    pub fn new() -> NotifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(CALLBACK_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Deliver `payload` to `callback_url`, a no-op when none is set.
    ///
    /// Any response status >= 300 is a delivery failure.
    pub async fn notify(
        &self,
        callback_url: Option<&str>,
        payload: &Notification,
    ) -> NotifyResult<NotifyOutcome> {
        let Some(url) = callback_url else {
            debug!("No callback URL configured, skipping notification");
            return Ok(NotifyOutcome::Skipped);
        };

        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();

        if status.as_u16() >= 300 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(job_id = %payload.job_id(), "Delivered callback notification");
        Ok(NotifyOutcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgif_models::JobId;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completed() -> Notification {
        Notification::completed(JobId::from_string("job-1"), "https://signed", "out.gif")
    }

    #[tokio::test]
    async fn test_no_callback_is_a_noop() {
        let notifier = Notifier::new().unwrap();
        let outcome = notifier.notify(None, &completed()).await.unwrap();
        assert_eq!(outcome, NotifyOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_delivers_json_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_json(&completed()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Notifier::new().unwrap();
        let url = format!("{}/hook", server.uri());
        let outcome = notifier.notify(Some(&url), &completed()).await.unwrap();
        assert_eq!(outcome, NotifyOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("broken hook"))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Notifier::new().unwrap();
        let err = notifier
            .notify(Some(&server.uri()), &completed())
            .await
            .unwrap_err();
        match err {
            NotifyError::Rejected { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "broken hook");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
