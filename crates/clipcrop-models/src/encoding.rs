//! Output encoding settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output frame rate for every rendered clip.
pub const OUTPUT_FPS: u32 = 30;

/// Encoding settings applied after the crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutputSettings {
    /// Output frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Keep the audio track (clips are written silent by default)
    #[serde(default)]
    pub keep_audio: bool,
}

fn default_fps() -> u32 {
    OUTPUT_FPS
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            fps: OUTPUT_FPS,
            keep_audio: false,
        }
    }
}
