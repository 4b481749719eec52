use campusview_common::Viewpoint;
use glam::{Vec2, Vec3};

/// Construction parameters for a camera manipulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulatorConfig {
    /// Eye position the manipulator starts from.
    pub orbit_home_position: Vec3,
    /// Point the camera orbits around.
    pub target_position: Vec3,
    /// Up direction, used as authored.
    pub up_vector: Vec3,
    /// Radians of orbit per pixel of drag, per axis.
    pub orbit_speed: Vec2,
    /// Fraction of the eye distance moved per unit of scroll.
    pub zoom_speed: f32,
}

impl Default for ManipulatorConfig {
    fn default() -> Self {
        Self::from_viewpoint(&Viewpoint::default())
    }
}

impl ManipulatorConfig {
    pub fn from_viewpoint(viewpoint: &Viewpoint) -> Self {
        Self {
            orbit_home_position: viewpoint.eye,
            target_position: viewpoint.target,
            up_vector: viewpoint.up,
            orbit_speed: Vec2::new(0.003, 0.003),
            zoom_speed: 0.01,
        }
    }

    pub fn with_orbit_speed(mut self, orbit_speed: Vec2) -> Self {
        self.orbit_speed = orbit_speed;
        self
    }

    pub fn with_zoom_speed(mut self, zoom_speed: f32) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }

    /// Same config aimed at a different viewpoint, keeping the speeds.
    pub fn retarget(self, viewpoint: &Viewpoint) -> Self {
        Self {
            orbit_home_position: viewpoint.eye,
            target_position: viewpoint.target,
            up_vector: viewpoint.up,
            ..self
        }
    }

    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint::new(self.orbit_home_position, self.target_position, self.up_vector)
    }
}

/// Operations a camera manipulator accepts from the gesture layer.
///
/// Coordinates are in the manipulator's space: pixels, origin bottom-left.
pub trait CameraManipulator {
    /// Start an orbit (or a pan when `pan_mode` is set) at the given point.
    fn grab_begin(&mut self, x: f32, y: f32, pan_mode: bool);

    /// Continue the current grab.
    fn grab_update(&mut self, x: f32, y: f32);

    /// Finish the current grab. A no-op if none is active.
    fn grab_end(&mut self);

    /// Zoom around the focal point; positive `delta` moves the eye away.
    fn scroll(&mut self, x: f32, y: f32, delta: f32);

    /// Current `(eye, target, up)`.
    fn get_look_at(&self) -> (Vec3, Vec3, Vec3);

    /// Replace the configuration, moving the camera to the new home.
    fn configure(&mut self, config: ManipulatorConfig);

    fn viewpoint(&self) -> Viewpoint {
        let (eye, target, up) = self.get_look_at();
        Viewpoint::new(eye, target, up)
    }
}
