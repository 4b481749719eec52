use campusview_camera::CameraManipulator;
use glam::Vec2;

use crate::gesture::{GestureEvent, GestureKind};
use crate::race::GestureRace;

/// Pinch sensitivity: scroll units per unit of scale change.
pub const SCALE_MULTIPLIER: f32 = 100.0;

/// Tunables for the gesture translator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Scroll delta produced per unit of pinch scale change.
    pub scale_multiplier: f32,
    /// Pan events reporting more contacts than this are ignored.
    pub max_pan_pointers: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            scale_multiplier: SCALE_MULTIPLIER,
            max_pan_pointers: 1,
        }
    }
}

/// Ephemeral state of the current drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanSession {
    pub active: bool,
    pub last_pointer: Option<Vec2>,
}

/// Maps gesture callbacks onto manipulator calls.
///
/// View coordinates grow downward while the manipulator's vertical axis grows
/// upward, so every y is flipped against the viewport height.
#[derive(Debug, Clone)]
pub struct GestureTranslator {
    config: GestureConfig,
    viewport_height: f32,
    race: GestureRace,
    pan: PanSession,
    previous_scale: f32,
}

impl GestureTranslator {
    pub fn new(viewport_height: f32) -> Self {
        Self::with_config(viewport_height, GestureConfig::default())
    }

    pub fn with_config(viewport_height: f32, config: GestureConfig) -> Self {
        Self {
            config,
            viewport_height,
            race: GestureRace::new(),
            pan: PanSession::default(),
            previous_scale: 1.0,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    pub fn pan_session(&self) -> PanSession {
        self.pan
    }

    pub fn previous_scale(&self) -> f32 {
        self.previous_scale
    }

    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.race.winner()
    }

    /// Drop all session state, e.g. when the screen is torn down.
    pub fn reset(&mut self) {
        self.race.reset();
        self.pan = PanSession::default();
        self.previous_scale = 1.0;
    }

    /// Flip a view-space y into manipulator space.
    pub fn flip_y(&self, y: f32) -> f32 {
        self.viewport_height - y
    }

    /// Route one gesture callback to the manipulator, if there is one.
    pub fn handle<M>(&mut self, event: GestureEvent, manipulator: Option<&mut M>)
    where
        M: CameraManipulator + ?Sized,
    {
        if let GestureEvent::PanBegin { pointers, .. } | GestureEvent::PanUpdate { pointers, .. } =
            event
        {
            if pointers > self.config.max_pan_pointers {
                tracing::trace!(pointers, "pan ignored: too many contacts");
                return;
            }
        }

        if matches!(event, GestureEvent::PanUpdate { .. }) && !self.pan.active {
            tracing::trace!("pan update ignored: no drag in progress");
            return;
        }

        let admitted = self.race.admit(&event);
        // grab_end is issued even when the pan never started.
        if !admitted && event != GestureEvent::PanEnd {
            return;
        }

        match event {
            GestureEvent::PanBegin { x, y, .. } => {
                self.pan = PanSession {
                    active: true,
                    last_pointer: Some(Vec2::new(x, y)),
                };
                let y = self.flip_y(y);
                with_manipulator(manipulator, |m| m.grab_begin(x, y, false));
            }
            GestureEvent::PanUpdate { x, y, .. } => {
                self.pan.last_pointer = Some(Vec2::new(x, y));
                let y = self.flip_y(y);
                with_manipulator(manipulator, |m| m.grab_update(x, y));
            }
            GestureEvent::PanEnd => {
                self.pan = PanSession::default();
                with_manipulator(manipulator, |m| m.grab_end());
            }
            GestureEvent::PinchBegin { scale, .. } => {
                self.previous_scale = scale;
            }
            GestureEvent::PinchUpdate {
                scale,
                focal_x,
                focal_y,
            } => {
                let delta = scale - self.previous_scale;
                self.previous_scale = scale;
                let y = self.flip_y(focal_y);
                let scroll = -delta * self.config.scale_multiplier;
                with_manipulator(manipulator, |m| m.scroll(focal_x, y, scroll));
            }
            GestureEvent::PinchEnd => {
                self.previous_scale = 1.0;
            }
        }
    }
}

fn with_manipulator<M>(manipulator: Option<&mut M>, call: impl FnOnce(&mut M))
where
    M: CameraManipulator + ?Sized,
{
    match manipulator {
        Some(m) => call(m),
        None => tracing::trace!("no camera manipulator; gesture skipped"),
    }
}
