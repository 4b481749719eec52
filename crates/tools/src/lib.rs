//! Developer Tooling: camera coordinate readout for authoring new presets.
//!
//! # Invariants
//! - Tools only read camera state.

mod readout;

pub use readout::LookAtReadout;

pub fn crate_info() -> &'static str {
    "campusview-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
