//! Output canvas constants.
//!
//! Every clip is rendered onto the same 9:16 portrait frame of exactly
//! 1080×1920 pixels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Target width for portrait (9:16) output.
pub const PORTRAIT_WIDTH: u32 = 1080;

/// Target height for portrait (9:16) output.
pub const PORTRAIT_HEIGHT: u32 = 1920;

/// Fixed output frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TargetCanvas {
    pub width: u32,
    pub height: u32,
}

impl TargetCanvas {
    /// The 1080×1920 portrait canvas.
    pub const PORTRAIT: TargetCanvas = TargetCanvas {
        width: PORTRAIT_WIDTH,
        height: PORTRAIT_HEIGHT,
    };

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Default for TargetCanvas {
    fn default() -> Self {
        Self::PORTRAIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_dimensions() {
        assert_eq!(TargetCanvas::PORTRAIT.width, 1080);
        assert_eq!(TargetCanvas::PORTRAIT.height, 1920);
        assert_eq!(TargetCanvas::default(), TargetCanvas::PORTRAIT);
    }

    #[test]
    fn test_portrait_ratio_is_exact() {
        // 9:16 is exactly representable, the tie-break depends on this
        assert_eq!(TargetCanvas::PORTRAIT.aspect_ratio(), 0.5625);
    }
}
