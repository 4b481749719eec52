use glam::{Quat, Vec2, Vec3};

use crate::manipulator::{CameraManipulator, ManipulatorConfig};

/// Closest the eye may get to the target.
const MIN_DISTANCE: f32 = 1e-3;

/// Largest |cos| between the eye offset and the up axis; keeps the camera off the poles.
const MAX_POLAR_COS: f32 = 0.995;

#[derive(Debug, Clone, Copy)]
struct Grab {
    last: Vec2,
    pan: bool,
}

/// Orbit-style manipulator: drags rotate the eye around the target, pan-mode
/// drags slide eye and target together, scrolling dollies along the view.
#[derive(Debug, Clone)]
pub struct OrbitManipulator {
    config: ManipulatorConfig,
    eye: Vec3,
    target: Vec3,
    grab: Option<Grab>,
}

impl Default for OrbitManipulator {
    fn default() -> Self {
        Self::new(ManipulatorConfig::default())
    }
}

impl OrbitManipulator {
    pub fn new(config: ManipulatorConfig) -> Self {
        Self {
            config,
            eye: config.orbit_home_position,
            target: config.target_position,
            grab: None,
        }
    }

    pub fn config(&self) -> &ManipulatorConfig {
        &self.config
    }

    pub fn is_grabbing(&self) -> bool {
        self.grab.is_some()
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    fn up_axis(&self) -> Vec3 {
        self.config.up_vector.try_normalize().unwrap_or(Vec3::Y)
    }

    fn orbit_by(&mut self, delta: Vec2) {
        let up = self.up_axis();
        let speed = self.config.orbit_speed;

        let yaw = Quat::from_axis_angle(up, -delta.x * speed.x);
        let mut offset = yaw * (self.eye - self.target);

        if let Some(right) = offset.cross(up).try_normalize() {
            let pitched = Quat::from_axis_angle(right, -delta.y * speed.y) * offset;
            let polar_cos = pitched.try_normalize().map_or(1.0, |d| d.dot(up).abs());
            if polar_cos < MAX_POLAR_COS {
                offset = pitched;
            }
        }

        self.eye = self.target + offset;
    }

    fn pan_by(&mut self, delta: Vec2) {
        let Some(forward) = (self.target - self.eye).try_normalize() else {
            return;
        };
        let Some(right) = forward.cross(self.up_axis()).try_normalize() else {
            return;
        };
        let camera_up = right.cross(forward);
        let units_per_pixel = self.config.orbit_speed.x * self.distance();
        let shift = -(right * delta.x + camera_up * delta.y) * units_per_pixel;
        self.eye += shift;
        self.target += shift;
    }
}

impl CameraManipulator for OrbitManipulator {
    fn grab_begin(&mut self, x: f32, y: f32, pan_mode: bool) {
        self.grab = Some(Grab {
            last: Vec2::new(x, y),
            pan: pan_mode,
        });
    }

    fn grab_update(&mut self, x: f32, y: f32) {
        let Some(grab) = self.grab.as_mut() else {
            return;
        };
        let point = Vec2::new(x, y);
        let delta = point - grab.last;
        grab.last = point;
        let pan = grab.pan;

        if pan {
            self.pan_by(delta);
        } else {
            self.orbit_by(delta);
        }
    }

    fn grab_end(&mut self) {
        self.grab = None;
    }

    fn scroll(&mut self, _x: f32, _y: f32, delta: f32) {
        let Some(back) = (self.eye - self.target).try_normalize() else {
            return;
        };
        let distance = self.distance();
        let next = (distance + delta * self.config.zoom_speed * distance).max(MIN_DISTANCE);
        self.eye = self.target + back * next;
        tracing::trace!(delta, distance = next, "orbit scroll");
    }

    fn get_look_at(&self) -> (Vec3, Vec3, Vec3) {
        (self.eye, self.target, self.config.up_vector)
    }

    fn configure(&mut self, config: ManipulatorConfig) {
        *self = Self::new(config);
    }
}
