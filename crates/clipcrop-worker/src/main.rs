//! ClipCrop binary: search Pexels, download each result and write it as a
//! numbered portrait clip.

use anyhow::Context;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipcrop_media::{check_ffmpeg, check_ffprobe, FfmpegRunner, PortraitCropper};
use clipcrop_pexels::{PexelsClient, PexelsConfig};
use clipcrop_worker::{ClipPipeline, RunSummary, WorkerConfig, WorkerError};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for HTTPS)
    let _ = rustls::crypto::ring::default_provider().install_default();

    dotenvy::dotenv().ok();
    init_tracing();

    info!("Starting clipcrop");

    match run().await {
        Ok(summary) => {
            info!(
                written = summary.written.len(),
                failed = summary.failed.len(),
                "Run complete"
            );
        }
        Err(e) => {
            if let Some(diagnostics) = e.downcast_ref::<WorkerError>().and_then(|w| w.diagnostics()) {
                error!("FFmpeg output:\n{}", diagnostics);
            }
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<RunSummary> {
    let ffmpeg = check_ffmpeg()?;
    let ffprobe = check_ffprobe()?;
    info!(ffmpeg = %ffmpeg.display(), ffprobe = %ffprobe.display(), "Found media tools");

    let worker_config = WorkerConfig::from_env().context("invalid worker configuration")?;
    let pexels_config = PexelsConfig::from_env().context("invalid Pexels configuration")?;
    info!("Worker config: {:?}", worker_config);
    info!("Pexels config: {:?}", pexels_config);

    let client = PexelsClient::new(pexels_config)?;

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Received shutdown signal, cancelling (press Ctrl-C again to exit now)");
        let _ = cancel_tx.send(true);

        if tokio::signal::ctrl_c().await.is_ok() {
            error!("Received second shutdown signal, exiting");
            std::process::exit(130);
        }
    });

    let mut runner = FfmpegRunner::new().with_cancel(cancel_rx.clone());
    if let Some(timeout) = worker_config.ffmpeg_timeout {
        runner = runner.with_timeout(timeout.as_secs());
    }

    let pipeline = ClipPipeline::new(worker_config, client, PortraitCropper::new(runner))
        .with_cancel(cancel_rx);

    Ok(pipeline.run().await?)
}

/// Colored output for dev, JSON when `LOG_FORMAT=json`.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,clipcrop=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
