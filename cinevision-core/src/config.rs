//! Engine tuning constants.

use std::time::Duration;

/// Tunable constants for one engine instance. These can come from
/// [`Default`] or be provided ad-hoc by callsites that want a different
/// interaction feel.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quiet period between the last query edit and the committed search.
    pub debounce: Duration,
    /// Accumulated wheel delta required per navigation step.
    pub wheel_threshold: f32,
    /// Lower clamp for the drag step threshold.
    pub drag_threshold_min: f32,
    /// Upper clamp for the drag step threshold.
    pub drag_threshold_max: f32,
    /// Viewport-width divisor producing the unclamped drag threshold.
    pub drag_threshold_divisor: f32,
    /// Duration of a backdrop opacity fade.
    pub backdrop_fade: Duration,
    /// Opacity applied to a resolved backdrop image.
    pub backdrop_opacity: f32,
    /// Base URL provider-relative image paths are joined onto.
    pub image_base: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(450),
            wheel_threshold: 80.0,
            drag_threshold_min: 30.0,
            drag_threshold_max: 70.0,
            drag_threshold_divisor: 25.0,
            backdrop_fade: Duration::from_millis(350),
            backdrop_opacity: 0.9,
            image_base: "https://image.tmdb.org/t/p".to_string(),
        }
    }
}

impl EngineConfig {
    /// Drag displacement per navigation step at the given viewport width.
    /// Wider viewports need longer swipes, bounded by the configured clamps.
    pub fn drag_threshold(&self, viewport_width: f32) -> f32 {
        (viewport_width / self.drag_threshold_divisor)
            .clamp(self.drag_threshold_min, self.drag_threshold_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_threshold_scales_with_viewport() {
        let config = EngineConfig::default();
        assert_eq!(config.drag_threshold(1000.0), 40.0);
    }

    #[test]
    fn drag_threshold_clamps_both_ends() {
        let config = EngineConfig::default();
        assert_eq!(config.drag_threshold(320.0), 30.0);
        assert_eq!(config.drag_threshold(2560.0), 70.0);
    }
}
