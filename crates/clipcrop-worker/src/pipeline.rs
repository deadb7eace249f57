//! Search, fetch, crop, save.
//!
//! Clips are processed strictly one after another. Each clip owns a fresh
//! scratch directory for its download and render; the directory is removed
//! when the clip finishes whether it succeeded or not. The rendered file is
//! moved to `<output_dir>/<index>.mp4` only after FFmpeg succeeds.

use std::path::PathBuf;

use tokio::sync::watch;
use tracing::{info, Instrument};

use clipcrop_media::{move_file, wait_for_cancel, ClipTranscoder};
use clipcrop_pexels::{ClipSource, PexelsClient};

use crate::config::{FailurePolicy, WorkerConfig};
use crate::error::{WorkerError, WorkerResult};
use crate::logging::ClipLogger;

/// A clip that was skipped under [`FailurePolicy::Skip`].
#[derive(Debug, Clone)]
pub struct FailedClip {
    pub index: usize,
    pub video_id: u64,
    pub error: String,
}

/// Result of a full run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Output files, in result order
    pub written: Vec<PathBuf>,
    pub failed: Vec<FailedClip>,
}

/// Drives the per-clip pipeline over one search.
pub struct ClipPipeline<T> {
    config: WorkerConfig,
    client: PexelsClient,
    transcoder: T,
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl<T: ClipTranscoder> ClipPipeline<T> {
    pub fn new(config: WorkerConfig, client: PexelsClient, transcoder: T) -> Self {
        Self {
            config,
            client,
            transcoder,
            cancel_rx: None,
        }
    }

    /// Stop the run once the flag is set, abandoning any in-flight download.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Search once and process every result.
    pub async fn run(&self) -> WorkerResult<RunSummary> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        tokio::fs::create_dir_all(&self.config.work_dir).await?;

        let sources = self.client.search().await?;
        info!(clips = sources.len(), "Processing search results");

        let mut summary = RunSummary::default();

        for (i, source) in sources.iter().enumerate() {
            if self.is_cancelled() {
                return Err(WorkerError::Cancelled);
            }

            let logger = ClipLogger::new(i + 1, source.id);
            let result = self
                .process_clip(&logger, source)
                .instrument(logger.create_span())
                .await;

            match result {
                Ok(path) => summary.written.push(path),
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    if let Some(diagnostics) = e.diagnostics() {
                        logger.log_error(&format!("{}\n{}", e, diagnostics));
                    } else {
                        logger.log_error(&e.to_string());
                    }

                    match self.config.on_error {
                        FailurePolicy::Abort => return Err(e),
                        FailurePolicy::Skip => {
                            logger.log_warning("skipping");
                            summary.failed.push(FailedClip {
                                index: logger.index(),
                                video_id: logger.video_id(),
                                error: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Download, crop and save one clip.
    pub async fn process_clip(&self, logger: &ClipLogger, source: &ClipSource) -> WorkerResult<PathBuf> {
        logger.log_start(source.download_url.as_str());

        let scratch = tempfile::Builder::new()
            .prefix(&format!("clipcrop-{}-", logger.index()))
            .tempdir_in(&self.config.work_dir)?;
        let downloaded = scratch.path().join("source.mp4");
        let rendered = scratch.path().join("render.mp4");

        let bytes = tokio::select! {
            result = self.client.download(&source.download_url, &downloaded) => result?,
            _ = wait_for_cancel(self.cancel_rx.clone()) => {
                logger.log_warning("cancelled during download");
                return Err(WorkerError::Cancelled);
            }
        };
        logger.log_progress(&format!("downloaded {} bytes", bytes));

        let plan = self.transcoder.transcode(&downloaded, &rendered).await?;
        logger.log_progress(&format!(
            "cropped with {:?} at ({:.1}, {:.1})",
            plan.scale, plan.crop_x, plan.crop_y
        ));

        let dest = self.config.output_path(logger.index());
        move_file(&rendered, &dest).await?;

        logger.log_completion(&dest.display().to_string());
        Ok(dest)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_rx.as_ref().is_some_and(|rx| *rx.borrow())
    }
}
