//! Aspect-fit crop planning.
//!
//! Converts footage of any aspect ratio to the portrait canvas without
//! distortion: scale until one axis matches the canvas exactly, then crop
//! the excess on the other axis symmetrically.
//!
//! ```text
//!   wide source (r > 9/16)          tall source (r <= 9/16)
//!   scale height -> 1920            scale width -> 1080
//!   +----+--------+----+            +--------+
//!   |    |  crop  |    |            |        |  <- crop_y
//!   |    | 1080w  |    |            +--------+
//!   +----+--------+----+            |  crop  |
//!    ^ crop_x                       | 1920h  |
//!                                   +--------+
//!                                   |        |
//!                                   +--------+
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::canvas::TargetCanvas;
use crate::dimensions::SourceDimensions;
use crate::error::{PlanError, PlanResult};

/// Which axis the source is scaled to match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScaleAxis {
    /// Height becomes the canvas height; width follows the source ratio.
    FitHeight,
    /// Width becomes the canvas width; height follows the source ratio.
    FitWidth,
}

/// Scale-then-crop parameters that map a source frame onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CropPlan {
    /// Axis pinned by the scale step
    pub scale: ScaleAxis,
    /// Frame width after scaling
    pub scaled_width: f64,
    /// Frame height after scaling
    pub scaled_height: f64,
    /// Left offset of the crop window in the scaled frame
    pub crop_x: f64,
    /// Top offset of the crop window in the scaled frame
    pub crop_y: f64,
    /// Crop window width (always the canvas width)
    pub crop_width: u32,
    /// Crop window height (always the canvas height)
    pub crop_height: u32,
}

impl CropPlan {
    /// Build the plan for a validated source on the given canvas.
    ///
    /// A source whose ratio equals the canvas ratio exactly takes the
    /// width-first branch with zero margins. Sources so extreme that the
    /// scaled frame overflows `f64` are rejected as invalid input.
    pub fn fit(source: SourceDimensions, canvas: TargetCanvas) -> PlanResult<Self> {
        let target_w = canvas.width as f64;
        let target_h = canvas.height as f64;

        let plan = if source.aspect_ratio() > canvas.aspect_ratio() {
            let scaled_width = source.width() * (target_h / source.height());
            Self {
                scale: ScaleAxis::FitHeight,
                scaled_width,
                scaled_height: target_h,
                crop_x: (scaled_width - target_w) / 2.0,
                crop_y: 0.0,
                crop_width: canvas.width,
                crop_height: canvas.height,
            }
        } else {
            let scaled_height = source.height() * (target_w / source.width());
            Self {
                scale: ScaleAxis::FitWidth,
                scaled_width: target_w,
                scaled_height,
                crop_x: 0.0,
                crop_y: (scaled_height - target_h) / 2.0,
                crop_width: canvas.width,
                crop_height: canvas.height,
            }
        };

        if !(plan.scaled_width.is_finite() && plan.scaled_height.is_finite()) {
            return Err(PlanError::invalid_input(source.width(), source.height()));
        }

        Ok(plan)
    }

    /// Frame size produced by applying the plan.
    pub fn output_dimensions(&self) -> (u32, u32) {
        (self.crop_width, self.crop_height)
    }
}

/// Plan a portrait crop for raw source dimensions.
///
/// Fails with [`PlanError::InvalidInput`](crate::PlanError::InvalidInput)
/// when either dimension is zero, negative or non-finite, or when the
/// scaled frame would not be finite.
pub fn plan_crop(width: f64, height: f64) -> PlanResult<CropPlan> {
    let source = SourceDimensions::new(width, height)?;
    CropPlan::fit(source, TargetCanvas::PORTRAIT)
}
