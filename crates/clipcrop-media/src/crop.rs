//! Portrait transcoding.
//!
//! Probes the source, plans an aspect-fit crop onto the 1080×1920 canvas
//! and renders it with a single FFmpeg pass: scale, centered crop, 30 fps,
//! audio removed.

use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

use clipcrop_models::{CropPlan, OutputSettings, TargetCanvas};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::filters::build_portrait_filter;
use crate::probe::probe_video;

/// Converts one downloaded clip into a finished portrait clip.
#[async_trait]
pub trait ClipTranscoder: Send + Sync {
    /// Render `input` to `output`, returning the plan that was applied.
    async fn transcode(&self, input: &Path, output: &Path) -> MediaResult<CropPlan>;
}

/// FFmpeg-backed [`ClipTranscoder`].
#[derive(Debug, Clone, Default)]
pub struct PortraitCropper {
    runner: FfmpegRunner,
    settings: OutputSettings,
}

impl PortraitCropper {
    pub fn new(runner: FfmpegRunner) -> Self {
        Self {
            runner,
            settings: OutputSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: OutputSettings) -> Self {
        self.settings = settings;
        self
    }

    /// FFmpeg invocation that applies `plan` to `input`.
    pub fn command_for(&self, input: &Path, output: &Path, plan: &CropPlan) -> FfmpegCommand {
        let cmd = FfmpegCommand::new(input, output)
            .video_filter(build_portrait_filter(plan, &self.settings));
        if self.settings.keep_audio {
            cmd
        } else {
            cmd.no_audio()
        }
    }
}

#[async_trait]
impl ClipTranscoder for PortraitCropper {
    async fn transcode(&self, input: &Path, output: &Path) -> MediaResult<CropPlan> {
        let info = probe_video(input).await?;
        let plan = CropPlan::fit(info.dimensions()?, TargetCanvas::PORTRAIT)?;

        info!(
            input = %input.display(),
            source_width = info.width,
            source_height = info.height,
            scale = ?plan.scale,
            crop_x = plan.crop_x,
            crop_y = plan.crop_y,
            "Cropping clip to portrait"
        );

        let cmd = self.command_for(input, output, &plan);
        let total_ms = info.duration_ms();
        let label = output.display().to_string();

        self.runner
            .run_with_progress(&cmd, move |progress| {
                debug!(
                    output = %label,
                    frame = progress.frame,
                    speed = progress.speed,
                    "Encoding {:.1}%",
                    progress.percentage(total_ms)
                );
            })
            .await?;

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipcrop_models::plan_crop;

    #[test]
    fn test_command_drops_audio_by_default() {
        let cropper = PortraitCropper::default();
        let plan = plan_crop(1920.0, 1080.0).unwrap();
        let args = cropper
            .command_for(Path::new("source.mp4"), Path::new("1.mp4"), &plan)
            .build_args();

        assert!(args.contains(&"-an".to_string()));
        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert!(args[vf + 1].starts_with("scale=-1:1920,crop=1080:1920:"));
        assert!(args[vf + 1].ends_with(",fps=30"));
        assert_eq!(args.last().unwrap(), "1.mp4");
    }

    #[test]
    fn test_command_keeps_audio_when_asked() {
        let cropper = PortraitCropper::default().with_settings(OutputSettings {
            keep_audio: true,
            ..Default::default()
        });
        let plan = plan_crop(1080.0, 1920.0).unwrap();
        let args = cropper
            .command_for(Path::new("a.mp4"), Path::new("b.mp4"), &plan)
            .build_args();
        assert!(!args.contains(&"-an".to_string()));
    }

    #[tokio::test]
    #[ignore = "requires ffmpeg"]
    async fn test_transcode_landscape_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.mp4");
        let output = dir.path().join("1.mp4");

        let gen = FfmpegCommand::new("testsrc=size=1280x720:rate=25:duration=1", &source)
            .input_arg("-f")
            .input_arg("lavfi");
        FfmpegRunner::new().run(&gen).await.unwrap();

        let plan = PortraitCropper::default()
            .transcode(&source, &output)
            .await
            .unwrap();
        assert_eq!(plan.output_dimensions(), (1080, 1920));

        let info = probe_video(&output).await.unwrap();
        assert_eq!((info.width, info.height), (1080, 1920));
        assert!((info.fps - 30.0).abs() < 0.01);
    }
}
