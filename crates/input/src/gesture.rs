/// A recognized gesture callback, in view coordinates (origin top-left, y down).
///
/// The host's gesture recognizer produces these; the translator consumes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A drag started at the given point with `pointers` contacts down.
    PanBegin { x: f32, y: f32, pointers: u32 },
    /// The drag moved.
    PanUpdate { x: f32, y: f32, pointers: u32 },
    /// The drag finished or was cancelled.
    PanEnd,
    /// A pinch started. `scale` is the recognizer's cumulative scale (1.0 at start).
    PinchBegin { scale: f32, focal_x: f32, focal_y: f32 },
    /// The pinch changed.
    PinchUpdate { scale: f32, focal_x: f32, focal_y: f32 },
    /// The pinch finished or was cancelled.
    PinchEnd,
}

/// Which recognizer produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Pan,
    Pinch,
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::PanBegin { .. } | Self::PanUpdate { .. } | Self::PanEnd => GestureKind::Pan,
            Self::PinchBegin { .. } | Self::PinchUpdate { .. } | Self::PinchEnd => {
                GestureKind::Pinch
            }
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Self::PanEnd | Self::PinchEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let pan = GestureEvent::PanBegin {
            x: 0.0,
            y: 0.0,
            pointers: 1,
        };
        assert_eq!(pan.kind(), GestureKind::Pan);
        assert_eq!(GestureEvent::PinchEnd.kind(), GestureKind::Pinch);
    }

    #[test]
    fn ends() {
        assert!(GestureEvent::PanEnd.is_end());
        assert!(GestureEvent::PinchEnd.is_end());
        let update = GestureEvent::PinchUpdate {
            scale: 1.1,
            focal_x: 0.0,
            focal_y: 0.0,
        };
        assert!(!update.is_end());
    }
}
