use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Below this squared length a direction is treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-10;

/// Sine of the smallest angle allowed between the up-vector and the view direction.
const PARALLEL_TOLERANCE: f32 = 1e-4;

/// A camera configuration: eye position, look-at target and up direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 8.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl Viewpoint {
    pub const fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self { eye, target, up }
    }

    /// Component-wise linear interpolation towards `other`.
    ///
    /// `t` is clamped to `[0, 1]`. The endpoints are returned exactly at
    /// `t == 0` and `t == 1` so a finished transition lands on its preset.
    pub fn lerp(&self, other: &Viewpoint, t: f32) -> Viewpoint {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        // from + (to - from) * t keeps equal endpoints bit-exact.
        Viewpoint {
            eye: self.eye + (other.eye - self.eye) * t,
            target: self.target + (other.target - self.target) * t,
            up: self.up + (other.up - self.up) * t,
        }
    }

    /// Unnormalized direction from the eye to the target.
    pub fn view_direction(&self) -> Vec3 {
        self.target - self.eye
    }

    /// Distance between eye and target.
    pub fn distance(&self) -> f32 {
        self.view_direction().length()
    }

    /// True when the camera orientation is undefined: eye on the target,
    /// a zero up-vector, or an up-vector parallel to the view direction.
    pub fn is_degenerate(&self) -> bool {
        let dir = self.view_direction();
        if dir.length_squared() < DEGENERATE_EPSILON || self.up.length_squared() < DEGENERATE_EPSILON
        {
            return true;
        }
        dir.normalize().cross(self.up.normalize()).length() < PARALLEL_TOLERANCE
    }

    pub fn field(&self, field: ViewpointField) -> Vec3 {
        match field {
            ViewpointField::Eye => self.eye,
            ViewpointField::Target => self.target,
            ViewpointField::Up => self.up,
        }
    }

    /// Copy of this viewpoint with one vector replaced.
    pub fn with_field(mut self, field: ViewpointField, value: Vec3) -> Self {
        match field {
            ViewpointField::Eye => self.eye = value,
            ViewpointField::Target => self.target = value,
            ViewpointField::Up => self.up = value,
        }
        self
    }
}

/// One of the three vectors of a viewpoint, as edited in the manual entry panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewpointField {
    Eye,
    Target,
    Up,
}

impl ViewpointField {
    pub const ALL: [ViewpointField; 3] = [Self::Eye, Self::Target, Self::Up];

    pub fn label(self) -> &'static str {
        match self {
            Self::Eye => "Eye Position",
            Self::Target => "Target Position",
            Self::Up => "Up Vector",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Viewpoint {
        Viewpoint::new(
            Vec3::new(1.39, 0.30, 0.30),
            Vec3::new(0.43, 0.09, 0.09),
            Vec3::Y,
        )
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = sample();
        let b = Viewpoint::new(Vec3::new(-0.7, 0.1, 3.3), Vec3::ZERO, Vec3::new(0.1, 0.9, 0.0));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 7.5), b);
        assert_eq!(a.lerp(&b, -2.0), a);
    }

    #[test]
    fn lerp_between_equal_endpoints_is_exact() {
        let vp = Viewpoint::new(
            Vec3::new(-0.5426, -0.0179, -0.3014),
            Vec3::new(-0.8025, -0.0982, 0.6609),
            Vec3::new(-0.2580, 21.8948, 1.7567),
        );
        for i in 0..=1000 {
            assert_eq!(vp.lerp(&vp, i as f32 / 1000.0), vp);
        }
        assert_eq!(sample().lerp(&sample(), 0.37), sample());
    }

    #[test]
    fn lerp_midpoint_is_mean() {
        let a = Viewpoint::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0), Vec3::Y);
        let b = Viewpoint::new(Vec3::new(4.0, -2.0, 8.0), Vec3::ZERO, Vec3::X);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.eye - Vec3::new(2.0, -1.0, 4.0)).length() < 1e-6);
        assert!((mid.target - Vec3::new(1.0, 1.0, 1.0)).length() < 1e-6);
        assert!((mid.up - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn default_is_not_degenerate() {
        assert!(!Viewpoint::default().is_degenerate());
        assert!(!sample().is_degenerate());
    }

    #[test]
    fn parallel_up_is_degenerate() {
        let vp = Viewpoint::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(vp.is_degenerate());
    }

    #[test]
    fn eye_on_target_is_degenerate() {
        let vp = Viewpoint::new(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(vp.is_degenerate());
    }

    #[test]
    fn long_up_vector_is_accepted() {
        let vp = Viewpoint::new(
            Vec3::new(-0.5426, -0.0179, -0.3014),
            Vec3::new(-0.8025, -0.0982, 0.6609),
            Vec3::new(-0.2580, 21.8948, 1.7567),
        );
        assert!(!vp.is_degenerate());
    }

    #[test]
    fn with_field_replaces_one_vector() {
        let vp = sample().with_field(ViewpointField::Up, Vec3::Z);
        assert_eq!(vp.up, Vec3::Z);
        assert_eq!(vp.eye, sample().eye);
        assert_eq!(vp.field(ViewpointField::Up), Vec3::Z);
    }

    #[test]
    fn field_labels() {
        let labels: Vec<_> = ViewpointField::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["Eye Position", "Target Position", "Up Vector"]);
    }
}
