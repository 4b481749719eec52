//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never move the camera; the view is an input.
//! - The model asset is referenced, never decoded, at this layer.
//!
//! The debug text renderer stands in for a GPU backend in the CLI and in
//! tests. The trait is stable; the wgpu backend lives in its own crate.

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{Light, ModelAsset, RenderView, Scene};

pub fn crate_info() -> &'static str {
    "campusview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
