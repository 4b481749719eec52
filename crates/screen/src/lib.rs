//! Viewer Screen: the state behind the interactive campus view.
//!
//! # Invariants
//! - All UI state lives in `ViewerScreen`; nothing is global.
//! - A rejected selection or entry never changes the applied viewpoint.
//! - After `unmount`, no frame or gesture reaches the released manipulator.

mod config;
mod screen;
mod task;

pub use config::ScreenConfig;
pub use screen::{Applied, ScreenError, ViewerScreen};
pub use task::{AnimationTask, TaskState};

pub fn crate_info() -> &'static str {
    "campusview-screen v0.1.0"
}
