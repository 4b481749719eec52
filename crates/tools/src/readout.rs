use campusview_common::Viewpoint;
use glam::Vec3;

/// Snapshot of the camera's look-at, printed when the user asks for coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtReadout {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl LookAtReadout {
    pub fn from_look_at((eye, target, up): (Vec3, Vec3, Vec3)) -> Self {
        Self { eye, target, up }
    }

    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint::new(self.eye, self.target, self.up)
    }

    /// The readout as a preset-file entry, ready to paste into a YAML preset list.
    pub fn to_preset_yaml(&self, name: &str) -> String {
        format!(
            "- name: {name}\n  eye: [{}]\n  target: [{}]\n  up: [{}]\n",
            fixed4(self.eye),
            fixed4(self.target),
            fixed4(self.up)
        )
    }
}

impl From<Viewpoint> for LookAtReadout {
    fn from(vp: Viewpoint) -> Self {
        Self {
            eye: vp.eye,
            target: vp.target,
            up: vp.up,
        }
    }
}

fn fixed4(v: Vec3) -> String {
    format!("{:.4}, {:.4}, {:.4}", v.x, v.y, v.z)
}

impl std::fmt::Display for LookAtReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Eye: {}\nTarget: {}\nUp: {}",
            fixed4(self.eye),
            fixed4(self.target),
            fixed4(self.up)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readout() -> LookAtReadout {
        LookAtReadout::from_look_at((
            Vec3::new(1.39, 0.3, 0.3),
            Vec3::new(0.43, 0.09, 0.09),
            Vec3::Y,
        ))
    }

    #[test]
    fn display_uses_four_decimals() {
        assert_eq!(
            readout().to_string(),
            "Eye: 1.3900, 0.3000, 0.3000\nTarget: 0.4300, 0.0900, 0.0900\nUp: 0.0000, 1.0000, 0.0000"
        );
    }

    #[test]
    fn preset_yaml_snippet() {
        let yaml = readout().to_preset_yaml("LIBRARY");
        assert!(yaml.starts_with("- name: LIBRARY\n"));
        assert!(yaml.contains("  up: [0.0000, 1.0000, 0.0000]\n"));
    }

    #[test]
    fn roundtrips_viewpoint() {
        let vp = readout().viewpoint();
        assert_eq!(LookAtReadout::from(vp), readout());
    }
}
