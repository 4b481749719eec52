use crate::scene::{Light, RenderView, Scene};

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene from the given view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Human-readable description of a frame, for the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let vp = view.look_at;
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (model={}, unit_cube={}) ===\n",
            scene.model.source, scene.model.transform_to_unit_cube
        ));
        let light = match scene.light {
            Light::Default => "default".to_string(),
            Light::Directional { .. } => "directional".to_string(),
        };
        let d = scene.light.direction();
        out.push_str(&format!(
            "Light: {light} dir=({:.2}, {:.2}, {:.2}) intensity={:.2}\n",
            d.x,
            d.y,
            d.z,
            scene.light.intensity()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.4}, {:.4}, {:.4}) target=({:.4}, {:.4}, {:.4}) up=({:.4}, {:.4}, {:.4}) fov={:.0}\n",
            vp.eye.x,
            vp.eye.y,
            vp.eye.z,
            vp.target.x,
            vp.target.y,
            vp.target.z,
            vp.up.x,
            vp.up.y,
            vp.up.z,
            view.fov_degrees
        ));
        out.push_str(&format!("Distance: {:.4}\n", vp.distance()));
        out
    }
}
