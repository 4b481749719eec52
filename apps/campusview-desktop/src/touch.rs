//! Raw pointer input turned into recognizer-level gesture events.

use std::collections::BTreeMap;

use campusview_input::GestureEvent;
use glam::Vec2;
use winit::event::TouchPhase;

/// Scale change per wheel line.
const WHEEL_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Pan,
    Pinch { start_distance: f32 },
}

/// Tracks touch contacts and emits pan or pinch events.
///
/// One finger pans. A second finger ends the pan and starts a pinch whose
/// scale is the finger spread relative to when the pinch began.
#[derive(Debug, Default)]
pub struct TouchTracker {
    touches: BTreeMap<u64, Vec2>,
    mode: Option<Mode>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts(&self) -> usize {
        self.touches.len()
    }

    pub fn touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, position);
                match (self.touches.len(), self.mode) {
                    (1, None) => {
                        self.mode = Some(Mode::Pan);
                        out.push(GestureEvent::PanBegin {
                            x: position.x,
                            y: position.y,
                            pointers: 1,
                        });
                    }
                    (2, Some(Mode::Pan) | None) => {
                        if self.mode == Some(Mode::Pan) {
                            out.push(GestureEvent::PanEnd);
                        }
                        let (focal, distance) = self.spread();
                        self.mode = Some(Mode::Pinch {
                            start_distance: distance.max(1.0),
                        });
                        out.push(GestureEvent::PinchBegin {
                            scale: 1.0,
                            focal_x: focal.x,
                            focal_y: focal.y,
                        });
                    }
                    _ => {}
                }
            }
            TouchPhase::Moved => {
                if let Some(p) = self.touches.get_mut(&id) {
                    *p = position;
                } else {
                    return out;
                }
                match self.mode {
                    Some(Mode::Pan) if self.touches.len() == 1 => {
                        out.push(GestureEvent::PanUpdate {
                            x: position.x,
                            y: position.y,
                            pointers: 1,
                        });
                    }
                    Some(Mode::Pinch { start_distance }) if self.touches.len() >= 2 => {
                        let (focal, distance) = self.spread();
                        out.push(GestureEvent::PinchUpdate {
                            scale: distance / start_distance,
                            focal_x: focal.x,
                            focal_y: focal.y,
                        });
                    }
                    _ => {}
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touches.remove(&id).is_none() {
                    return out;
                }
                match self.mode {
                    Some(Mode::Pan) if self.touches.is_empty() => {
                        self.mode = None;
                        out.push(GestureEvent::PanEnd);
                    }
                    Some(Mode::Pinch { .. }) if self.touches.len() < 2 => {
                        out.push(GestureEvent::PinchEnd);
                        // A remaining finger stays inert until it lifts.
                        self.mode = None;
                    }
                    _ => {}
                }
            }
        }
        out
    }

    /// Midpoint and distance of the first two contacts.
    fn spread(&self) -> (Vec2, f32) {
        let mut points = self.touches.values();
        match (points.next(), points.next()) {
            (Some(a), Some(b)) => ((*a + *b) * 0.5, a.distance(*b)),
            (Some(a), None) => (*a, 0.0),
            _ => (Vec2::ZERO, 0.0),
        }
    }
}

/// Accumulates trackpad magnification into a cumulative pinch scale.
#[derive(Debug, Default)]
pub struct TrackpadPinch {
    scale: Option<f32>,
}

impl TrackpadPinch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&mut self, delta: f32, phase: TouchPhase, focal: Vec2) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        if self.scale.is_none() && matches!(phase, TouchPhase::Started | TouchPhase::Moved) {
            self.scale = Some(1.0);
            out.push(GestureEvent::PinchBegin {
                scale: 1.0,
                focal_x: focal.x,
                focal_y: focal.y,
            });
        }
        match phase {
            TouchPhase::Started => {}
            TouchPhase::Moved => {
                if let Some(scale) = self.scale.as_mut() {
                    *scale = (*scale + delta).max(0.01);
                    out.push(GestureEvent::PinchUpdate {
                        scale: *scale,
                        focal_x: focal.x,
                        focal_y: focal.y,
                    });
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.scale.take().is_some() {
                    out.push(GestureEvent::PinchEnd);
                }
            }
        }
        out
    }
}

/// A mouse-wheel notch expressed as a complete pinch.
pub fn wheel_pinch(lines: f32, focal: Vec2) -> [GestureEvent; 3] {
    [
        GestureEvent::PinchBegin {
            scale: 1.0,
            focal_x: focal.x,
            focal_y: focal.y,
        },
        GestureEvent::PinchUpdate {
            scale: (1.0 + lines * WHEEL_STEP).max(0.01),
            focal_x: focal.x,
            focal_y: focal.y,
        },
        GestureEvent::PinchEnd,
    ]
}
