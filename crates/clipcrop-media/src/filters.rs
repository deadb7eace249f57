//! FFmpeg video filter rendering for crop plans.

use clipcrop_models::{CropPlan, OutputSettings, ScaleAxis};

/// Scale step of a plan. The free axis uses `-1` so FFmpeg keeps the
/// source aspect ratio.
pub fn scale_filter(plan: &CropPlan) -> String {
    match plan.scale {
        ScaleAxis::FitHeight => format!("scale=-1:{}", plan.crop_height),
        ScaleAxis::FitWidth => format!("scale={}:-1", plan.crop_width),
    }
}

/// Crop step of a plan, offsets relative to the scaled frame's top-left.
pub fn crop_filter(plan: &CropPlan) -> String {
    format!(
        "crop={}:{}:{}:{}",
        plan.crop_width, plan.crop_height, plan.crop_x, plan.crop_y
    )
}

/// Full `-vf` chain: scale, crop, then frame rate.
pub fn build_portrait_filter(plan: &CropPlan, settings: &OutputSettings) -> String {
    [
        scale_filter(plan),
        crop_filter(plan),
        format!("fps={}", settings.fps),
    ]
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipcrop_models::plan_crop;

    #[test]
    fn test_landscape_filter_chain() {
        let plan = plan_crop(1280.0, 720.0).unwrap();
        // 1280 * 1920/720 = 3413.33.., margin (3413.33 - 1080) / 2
        assert_eq!(scale_filter(&plan), "scale=-1:1920");
        assert!(crop_filter(&plan).starts_with("crop=1080:1920:1166.66"));
        assert!(crop_filter(&plan).ends_with(":0"));
    }

    #[test]
    fn test_portrait_filter_chain() {
        let plan = plan_crop(1080.0, 1920.0).unwrap();
        let filter = build_portrait_filter(&plan, &OutputSettings::default());
        assert_eq!(filter, "scale=1080:-1,crop=1080:1920:0:0,fps=30");
    }

    #[test]
    fn test_tall_filter_has_vertical_offset() {
        let plan = plan_crop(1080.0, 2880.0).unwrap();
        assert_eq!(scale_filter(&plan), "scale=1080:-1");
        assert_eq!(crop_filter(&plan), "crop=1080:1920:0:480");
    }
}
