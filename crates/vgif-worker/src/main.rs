//! GIF conversion worker binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vgif_media::GifTranscoder;
use vgif_storage::{ObsClient, ObsConfig};
use vgif_worker::{JobRunner, Notifier, WorkerResult};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production.
    // All diagnostics go to stderr: stdout carries the job's JSON lines.
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vgif=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting vgif-worker");

    if let Err(e) = run().await {
        error!("Job failed: {}", e);
        std::process::exit(1);
    }

    info!("Worker finished");
}

async fn run() -> WorkerResult<()> {
    let obs_config = ObsConfig::from_env()?;
    let spec = vgif_worker::config::load_job_spec()?;
    let strategy = vgif_worker::config::load_palette_strategy()?;

    let client = ObsClient::new(obs_config);
    let transcoder = GifTranscoder::new(strategy);
    let notifier = Notifier::new()?;

    let result = JobRunner::new(spec, client.clone(), transcoder, notifier)
        .run()
        .await;

    // Best-effort release on both paths; never masks the job's error.
    client.close();

    result.map(|_| ())
}
