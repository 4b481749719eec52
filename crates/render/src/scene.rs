use campusview_common::Viewpoint;
use glam::{Mat4, Vec3};

/// Lighting directive for a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Engine default: one sun-like directional light plus ambient.
    Default,
    /// A directional light shining *from* `direction`.
    Directional { direction: Vec3, intensity: f32 },
}

impl Light {
    /// Unit vector pointing towards the light.
    pub fn direction(&self) -> Vec3 {
        match self {
            Self::Default => Vec3::new(0.3, 1.0, 0.5).normalize(),
            Self::Directional { direction, .. } => direction.try_normalize().unwrap_or(Vec3::Y),
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Self::Default => 1.0,
            Self::Directional { intensity, .. } => *intensity,
        }
    }
}

/// Reference to a 3D model the engine loads.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub source: String,
    /// Scale and center the model so it fits the unit cube at the origin.
    pub transform_to_unit_cube: bool,
}

impl ModelAsset {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            transform_to_unit_cube: true,
        }
    }
}

/// What gets rendered: a light and one model.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub light: Light,
    pub model: ModelAsset,
}

impl Scene {
    pub fn new(model: ModelAsset) -> Self {
        Self {
            light: Light::Default,
            model,
        }
    }
}

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    pub look_at: Viewpoint,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::new(Viewpoint::default())
    }
}

impl RenderView {
    pub fn new(look_at: Viewpoint) -> Self {
        Self {
            look_at,
            fov_degrees: 45.0,
            aspect: 16.0 / 9.0,
            near: 0.01,
            far: 100.0,
        }
    }

    pub fn with_aspect(mut self, width: u32, height: u32) -> Self {
        self.aspect = width as f32 / height.max(1) as f32;
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        let up = self.look_at.up.try_normalize().unwrap_or(Vec3::Y);
        Mat4::look_at_rh(self.look_at.eye, self.look_at.target, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
