//! Camera manipulation: the grab/scroll contract the gesture layer drives,
//! plus an orbit manipulator that implements it.
//!
//! # Invariants
//! - `grab_end` is always safe to call, with or without a preceding `grab_begin`.
//! - Manipulator coordinates have the vertical axis pointing up.
//! - `configure` resets the camera to the configured home and drops any grab.

mod manipulator;
mod orbit;
mod recorder;

pub use manipulator::{CameraManipulator, ManipulatorConfig};
pub use orbit::OrbitManipulator;
pub use recorder::{ManipulatorCall, Recorder};
