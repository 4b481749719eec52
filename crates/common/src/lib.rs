//! Shared types for the campusview workspace.
//!
//! # Invariants
//! - A stored `Viewpoint` is plain data: copying it never aliases camera state.
//! - Up-vectors are kept exactly as authored, never normalized.

mod triple;
mod types;

pub use triple::{ParseError, format_triple, parse_triple};
pub use types::{Viewpoint, ViewpointField};
