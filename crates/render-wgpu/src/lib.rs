//! wgpu render backend for the campus viewer.
//!
//! Draws a floor grid, a lit unit cube standing in for the fitted model, and
//! a marker at the camera's look-at target.
//!
//! # Invariants
//! - The renderer never moves the camera; it only reads a `RenderView`.
//! - Frame rate is independent of transition timing.

mod gpu;
mod mesh;
mod pipeline;
mod shaders;

pub use gpu::WgpuRenderer;
