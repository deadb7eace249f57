//! Shared data models for ClipCrop.
//!
//! This crate provides Serde-serializable types for:
//! - Source media dimensions and the fixed portrait canvas
//! - Crop plans (scale-to-fill followed by a centered crop)
//! - Output encoding settings

pub mod canvas;
pub mod crop;
pub mod dimensions;
pub mod encoding;
pub mod error;

// Re-export common types
pub use canvas::{TargetCanvas, PORTRAIT_HEIGHT, PORTRAIT_WIDTH};
pub use crop::{plan_crop, CropPlan, ScaleAxis};
pub use dimensions::SourceDimensions;
pub use encoding::{OutputSettings, OUTPUT_FPS};
pub use error::{PlanError, PlanResult};
