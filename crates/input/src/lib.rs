//! Gesture input: pan and pinch callbacks translated into camera manipulator calls.
//!
//! # Invariants
//! - Pan and pinch never drive the camera at the same time within one touch sequence.
//! - Pan accepts a single contact; multi-touch pan events are ignored.
//! - Pinch zoom is incremental: each update uses the scale change since the previous one.
//! - A missing manipulator turns every call into a silent no-op.

pub mod gesture;
pub mod race;
pub mod translator;

pub use gesture::{GestureEvent, GestureKind};
pub use race::GestureRace;
pub use translator::{GestureConfig, GestureTranslator, SCALE_MULTIPLIER};
