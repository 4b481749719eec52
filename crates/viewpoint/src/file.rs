use campusview_common::Viewpoint;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::registry::ViewpointRegistry;

/// On-disk preset collection (YAML or JSON).
///
/// ```yaml
/// default: DEFAULT
/// presets:
///   - name: DEFAULT
///     label: Default
///     eye: [1.39, 0.30, 0.30]
///     target: [0.43, 0.09, 0.09]
///     up: [0.0, 1.0, 0.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub presets: Vec<PresetRecord>,
}

/// One preset as written in a preset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl PresetRecord {
    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint::new(self.eye, self.target, self.up)
    }
}

impl From<&ViewpointRegistry> for PresetFile {
    fn from(registry: &ViewpointRegistry) -> Self {
        Self {
            default: Some(registry.default_key().to_string()),
            presets: registry
                .entries()
                .iter()
                .map(|e| PresetRecord {
                    name: e.key.clone(),
                    label: e.label.clone(),
                    eye: e.viewpoint.eye,
                    target: e.viewpoint.target,
                    up: e.viewpoint.up,
                })
                .collect(),
        }
    }
}
