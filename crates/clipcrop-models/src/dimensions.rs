//! Source media dimensions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// Pixel dimensions of an input clip, as reported by the prober.
///
/// Both values are guaranteed positive and finite once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SourceDimensions {
    width: f64,
    height: f64,
}

impl SourceDimensions {
    /// Validate and wrap a width/height pair.
    pub fn new(width: f64, height: f64) -> PlanResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(PlanError::invalid_input(width, height));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl TryFrom<(u32, u32)> for SourceDimensions {
    type Error = PlanError;

    fn try_from((width, height): (u32, u32)) -> PlanResult<Self> {
        Self::new(width as f64, height as f64)
    }
}
