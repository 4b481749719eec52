//! Viewpoint registry and transition engine.
//!
//! # Invariants
//! - Registry keys are unique and keep their insertion order for listing.
//! - Degenerate viewpoints never enter the registry.
//! - A transition is a pure function of elapsed time and its two endpoints.

mod file;
mod registry;
mod transition;

pub use file::{PresetFile, PresetRecord};
pub use registry::{DEFAULT_KEY, PresetEntry, RegistryError, ViewpointRegistry};
pub use transition::Transition;

pub fn crate_info() -> &'static str {
    "campusview-viewpoint v0.1.0"
}
