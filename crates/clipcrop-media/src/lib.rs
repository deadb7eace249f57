//! FFmpeg CLI wrapper for portrait cropping.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building (arguments are never shell-joined)
//! - Progress parsing from `-progress pipe:2`
//! - Cancellation and timeout support via tokio
//! - FFprobe dimension probing
//! - The portrait transcoder that applies a [`CropPlan`](clipcrop_models::CropPlan)

pub mod command;
pub mod crop;
pub mod error;
pub mod filters;
pub mod fs_utils;
pub mod probe;
pub mod progress;

pub use command::{check_ffmpeg, check_ffprobe, wait_for_cancel, FfmpegCommand, FfmpegRunner};
pub use crop::{ClipTranscoder, PortraitCropper};
pub use error::{MediaError, MediaResult};
pub use fs_utils::move_file;
pub use probe::{probe_video, VideoInfo};
pub use progress::FfmpegProgress;
