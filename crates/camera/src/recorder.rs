use glam::Vec3;

use crate::manipulator::{CameraManipulator, ManipulatorConfig};

/// A single call made on a manipulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManipulatorCall {
    GrabBegin { x: f32, y: f32, pan_mode: bool },
    GrabUpdate { x: f32, y: f32 },
    GrabEnd,
    Scroll { x: f32, y: f32, delta: f32 },
    Configure(ManipulatorConfig),
}

impl std::fmt::Display for ManipulatorCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GrabBegin { x, y, pan_mode } => {
                write!(f, "grab_begin({x:.1}, {y:.1}, pan={pan_mode})")
            }
            Self::GrabUpdate { x, y } => write!(f, "grab_update({x:.1}, {y:.1})"),
            Self::GrabEnd => write!(f, "grab_end()"),
            Self::Scroll { x, y, delta } => write!(f, "scroll({x:.1}, {y:.1}, {delta:.3})"),
            Self::Configure(c) => write!(
                f,
                "configure(eye=({:.4}, {:.4}, {:.4}))",
                c.orbit_home_position.x, c.orbit_home_position.y, c.orbit_home_position.z
            ),
        }
    }
}

/// Forwards every call to an inner manipulator and keeps a log of them.
///
/// Used by the CLI to show what a gesture sequence produces, and by tests.
#[derive(Debug, Clone, Default)]
pub struct Recorder<M> {
    inner: M,
    calls: Vec<ManipulatorCall>,
}

impl<M: CameraManipulator> Recorder<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[ManipulatorCall] {
        &self.calls
    }

    /// Drain the log.
    pub fn take_calls(&mut self) -> Vec<ManipulatorCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: CameraManipulator> CameraManipulator for Recorder<M> {
    fn grab_begin(&mut self, x: f32, y: f32, pan_mode: bool) {
        self.calls.push(ManipulatorCall::GrabBegin { x, y, pan_mode });
        self.inner.grab_begin(x, y, pan_mode);
    }

    fn grab_update(&mut self, x: f32, y: f32) {
        self.calls.push(ManipulatorCall::GrabUpdate { x, y });
        self.inner.grab_update(x, y);
    }

    fn grab_end(&mut self) {
        self.calls.push(ManipulatorCall::GrabEnd);
        self.inner.grab_end();
    }

    fn scroll(&mut self, x: f32, y: f32, delta: f32) {
        self.calls.push(ManipulatorCall::Scroll { x, y, delta });
        self.inner.scroll(x, y, delta);
    }

    fn get_look_at(&self) -> (Vec3, Vec3, Vec3) {
        self.inner.get_look_at()
    }

    fn configure(&mut self, config: ManipulatorConfig) {
        self.calls.push(ManipulatorCall::Configure(config));
        self.inner.configure(config);
    }
}
