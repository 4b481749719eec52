use std::time::Duration;

use campusview_input::GestureConfig;
use glam::Vec2;

/// Screen configuration.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Length of a viewpoint transition.
    pub transition: Duration,
    /// Radians of orbit per pixel of drag.
    pub orbit_speed: Vec2,
    /// Fraction of the eye distance moved per unit of scroll.
    pub zoom_speed: f32,
    pub gestures: GestureConfig,
    /// Preset applied at start; `None` uses the registry's default key.
    pub default_key: Option<String>,
    /// Initial viewport size in pixels.
    pub viewport: (u32, u32),
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            transition: Duration::from_millis(500),
            orbit_speed: Vec2::new(0.003, 0.003),
            zoom_speed: 0.01,
            gestures: GestureConfig::default(),
            default_key: None,
            viewport: (1280, 720),
        }
    }
}
