//! Worker configuration.
//!
//! Everything is read from the environment exactly once at startup into
//! immutable values; a missing required variable aborts before any network
//! or process call is made.

use vgif_media::PaletteStrategy;
use vgif_models::{JobId, JobSpec};

use crate::error::{WorkerError, WorkerResult};

fn require_env(name: &str) -> WorkerResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(WorkerError::config(name)),
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Load the job description from the environment.
pub fn load_job_spec() -> WorkerResult<JobSpec> {
    Ok(JobSpec {
        source_key: require_env("SOURCE_OBJECT_KEY")?,
        target_key: require_env("TARGET_OBJECT_KEY")?,
        id: JobId::from_string(require_env("JOB_ID")?),
        callback_url: optional_env("CALLBACK_URL"),
        source_sha256: optional_env("SOURCE_OBJECT_SHA256"),
    })
}

/// Palette strategy selection, `single-pass` unless overridden.
pub fn load_palette_strategy() -> WorkerResult<PaletteStrategy> {
    match optional_env("GIF_PALETTE_STRATEGY") {
        None => Ok(PaletteStrategy::default()),
        Some(raw) => raw
            .parse()
            .map_err(|e: String| WorkerError::invalid_config("GIF_PALETTE_STRATEGY", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_job_env() {
        for var in [
            "SOURCE_OBJECT_KEY",
            "TARGET_OBJECT_KEY",
            "JOB_ID",
            "CALLBACK_URL",
            "SOURCE_OBJECT_SHA256",
            "GIF_PALETTE_STRATEGY",
        ] {
            std::env::remove_var(var);
        }
    }

    // One test so env mutation never races a parallel test thread.
    #[test]
    fn test_load_job_spec_from_env() {
        clear_job_env();

        let err = load_job_spec().unwrap_err();
        assert!(matches!(err, WorkerError::Config(ref v) if v == "SOURCE_OBJECT_KEY"));

        std::env::set_var("SOURCE_OBJECT_KEY", "in/video.mp4");
        std::env::set_var("TARGET_OBJECT_KEY", "out/video.gif");
        let err = load_job_spec().unwrap_err();
        assert!(matches!(err, WorkerError::Config(ref v) if v == "JOB_ID"));

        std::env::set_var("JOB_ID", "job-7");
        std::env::set_var("CALLBACK_URL", "");
        let spec = load_job_spec().unwrap();
        assert_eq!(spec.id.as_str(), "job-7");
        assert_eq!(spec.source_key, "in/video.mp4");
        assert_eq!(spec.target_key, "out/video.gif");
        // Empty optional counts as absent.
        assert!(spec.callback_url.is_none());
        assert!(spec.source_sha256.is_none());

        std::env::set_var("GIF_PALETTE_STRATEGY", "two-pass");
        assert_eq!(
            load_palette_strategy().unwrap(),
            vgif_media::PaletteStrategy::TwoPass
        );
        std::env::set_var("GIF_PALETTE_STRATEGY", "bogus");
        assert!(matches!(
            load_palette_strategy().unwrap_err(),
            WorkerError::InvalidConfig { .. }
        ));

        clear_job_env();
    }
}
