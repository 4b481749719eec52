use std::path::Path;

use campusview_common::Viewpoint;
use glam::Vec3;

use crate::file::PresetFile;

/// Key of the viewpoint applied when a screen first mounts.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// Up-vectors whose length falls outside this range are reported at load time.
const UP_LENGTH_RANGE: (f32, f32) = (0.5, 2.0);

/// Errors from registry lookups and preset loading.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("viewpoint {0:?} not found")]
    NotFound(String),
    #[error("viewpoint {0:?} is degenerate: eye on target or up-vector parallel to the view")]
    Degenerate(String),
    #[error("default viewpoint {0:?} is not among the presets")]
    MissingDefault(String),
    #[error("unsupported preset file format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named viewpoint with an optional display label.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetEntry {
    pub key: String,
    pub label: Option<String>,
    pub viewpoint: Viewpoint,
}

impl PresetEntry {
    /// Text shown on the preset button; falls back to the key.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

/// Ordered key → viewpoint store.
///
/// Read-mostly configuration data. Lookups are linear; registries hold a
/// handful of presets and the order matters for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewpointRegistry {
    entries: Vec<PresetEntry>,
    default_key: String,
}

impl Default for ViewpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewpointRegistry {
    /// Create an empty registry whose default key is [`DEFAULT_KEY`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            default_key: DEFAULT_KEY.to_string(),
        }
    }

    /// The compiled-in campus presets.
    pub fn campus() -> Self {
        let mut registry = Self::new();
        let presets = [
            (
                "DEFAULT",
                Some("Default"),
                Viewpoint::new(
                    Vec3::new(1.39, 0.30, 0.30),
                    Vec3::new(0.43, 0.09, 0.09),
                    Vec3::new(0.0, 1.0, 0.0),
                ),
            ),
            (
                "CCIS",
                None,
                Viewpoint::new(
                    Vec3::new(-0.5426, -0.0179, -0.3014),
                    Vec3::new(-0.8025, -0.0982, 0.6609),
                    // Authored with a ~22 unit length; kept as-is.
                    Vec3::new(-0.2580, 21.8948, 1.7567),
                ),
            ),
            (
                "COED",
                None,
                Viewpoint::new(
                    Vec3::new(-0.1543, -0.0221, -0.1367),
                    Vec3::new(-1.1491, 0.0198, -0.0447),
                    Vec3::new(0.0412, 0.9885, -0.0046),
                ),
            ),
            (
                "COM",
                None,
                Viewpoint::new(
                    Vec3::new(0.52, 0.23, 0.98),
                    Vec3::new(0.42, 0.07, -0.01),
                    Vec3::new(-0.02, 0.98, -0.15),
                ),
            ),
        ];
        for (key, label, viewpoint) in presets {
            if let Err(e) = registry.insert(key, viewpoint) {
                tracing::error!("built-in preset skipped: {e}");
                continue;
            }
            registry.set_label(key, label.map(str::to_string));
        }
        registry
    }

    /// Build a registry from a deserialized preset file.
    pub fn from_file(file: PresetFile) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for record in file.presets {
            let key = record.name.clone();
            registry.insert(key.clone(), record.viewpoint())?;
            registry.set_label(&key, record.label);
        }
        if let Some(default_key) = file.default {
            if !registry.contains(&default_key) {
                return Err(RegistryError::MissingDefault(default_key));
            }
            registry.default_key = default_key;
        }
        Ok(registry)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, RegistryError> {
        Self::from_file(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, RegistryError> {
        Self::from_file(serde_json::from_str(text)?)
    }

    /// Load a preset file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;
        let registry = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(RegistryError::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!(
            path = %path.display(),
            count = registry.len(),
            "loaded viewpoint presets"
        );
        Ok(registry)
    }

    /// Look up a viewpoint by key. Returns a copy.
    pub fn lookup(&self, key: &str) -> Result<Viewpoint, RegistryError> {
        self.entry(key)
            .map(|e| e.viewpoint)
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))
    }

    pub fn entry(&self, key: &str) -> Option<&PresetEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// All keys in presentation order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn entries(&self) -> &[PresetEntry] {
        &self.entries
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.entry(key).map(PresetEntry::display_label)
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace a viewpoint. A replaced key keeps its position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        viewpoint: Viewpoint,
    ) -> Result<(), RegistryError> {
        let key = key.into();
        if viewpoint.is_degenerate() {
            return Err(RegistryError::Degenerate(key));
        }

        let up_len = viewpoint.up.length();
        if !(UP_LENGTH_RANGE.0..=UP_LENGTH_RANGE.1).contains(&up_len) {
            tracing::warn!(
                key = %key,
                up_length = up_len,
                "up-vector is far from unit length; using it unnormalized"
            );
        }

        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => existing.viewpoint = viewpoint,
            None => self.entries.push(PresetEntry {
                key,
                label: None,
                viewpoint,
            }),
        }
        Ok(())
    }

    /// Set the display label of an existing key. Unknown keys are ignored.
    pub fn set_label(&mut self, key: &str, label: Option<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.label = label;
        }
    }

    /// Remove a key, returning its viewpoint.
    pub fn remove(&mut self, key: &str) -> Option<Viewpoint> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index).viewpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    const BUNDLED_YAML: &str = include_str!("../presets/campus.yaml");

    fn approx_eq(a: &Viewpoint, b: &Viewpoint) -> bool {
        (a.eye - b.eye).abs().max_element() < 1e-6
            && (a.target - b.target).abs().max_element() < 1e-6
            && (a.up - b.up).abs().max_element() < 1e-6
    }

    #[test]
    fn campus_keys_in_order() {
        let registry = ViewpointRegistry::campus();
        assert_eq!(registry.keys(), ["DEFAULT", "CCIS", "COED", "COM"]);
        assert_eq!(registry.default_key(), DEFAULT_KEY);
    }

    #[test]
    fn campus_labels() {
        let registry = ViewpointRegistry::campus();
        assert_eq!(registry.label("DEFAULT"), Some("Default"));
        assert_eq!(registry.label("CCIS"), Some("CCIS"));
        assert_eq!(registry.label("NOPE"), None);
    }

    #[test]
    fn lookup_found() {
        let registry = ViewpointRegistry::campus();
        let vp = registry.lookup("COM").unwrap();
        assert_eq!(vp.eye, Vec3::new(0.52, 0.23, 0.98));
    }

    #[test]
    fn lookup_missing_is_not_found() {
        let registry = ViewpointRegistry::campus();
        assert!(matches!(
            registry.lookup("UNKNOWN"),
            Err(RegistryError::NotFound(k)) if k == "UNKNOWN"
        ));
    }

    #[test]
    fn ccis_up_vector_is_not_normalized() {
        let registry = ViewpointRegistry::campus();
        let up = registry.lookup("CCIS").unwrap().up;
        assert!(up.length() > 20.0);
    }

    #[test]
    fn campus_reports_long_up_vector() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        let registry = tracing::subscriber::with_default(subscriber, ViewpointRegistry::campus);

        assert_eq!(registry.len(), 4);
        let log = captured.text();
        let warnings: Vec<&str> = log.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{log}");
        assert!(warnings[0].contains("CCIS"));
        assert!(warnings[0].contains("far from unit length"));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut registry = ViewpointRegistry::campus();
        let vp = Viewpoint::default();
        registry.insert("CCIS", vp).unwrap();
        assert_eq!(registry.keys(), ["DEFAULT", "CCIS", "COED", "COM"]);
        assert_eq!(registry.lookup("CCIS").unwrap(), vp);
    }

    #[test]
    fn insert_appends_new_key() {
        let mut registry = ViewpointRegistry::campus();
        registry.insert("LIBRARY", Viewpoint::default()).unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.keys().last(), Some(&"LIBRARY"));
    }

    #[test]
    fn insert_rejects_degenerate() {
        let mut registry = ViewpointRegistry::new();
        let vp = Viewpoint::new(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(matches!(
            registry.insert("TOP", vp),
            Err(RegistryError::Degenerate(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_returns_viewpoint() {
        let mut registry = ViewpointRegistry::campus();
        assert!(registry.remove("COED").is_some());
        assert!(!registry.contains("COED"));
        assert!(registry.remove("COED").is_none());
    }

    #[test]
    fn bundled_yaml_matches_compiled_presets() {
        let loaded = ViewpointRegistry::from_yaml_str(BUNDLED_YAML).unwrap();
        let campus = ViewpointRegistry::campus();
        assert_eq!(loaded.keys(), campus.keys());
        assert_eq!(loaded.default_key(), campus.default_key());
        for (a, b) in loaded.entries().iter().zip(campus.entries()) {
            assert_eq!(a.display_label(), b.display_label());
            assert!(approx_eq(&a.viewpoint, &b.viewpoint), "{} differs", a.key);
        }
    }

    #[test]
    fn json_presets_load() {
        let json = r#"{
            "default": "GATE",
            "presets": [
                { "name": "GATE", "label": "Main Gate",
                  "eye": [0.0, 1.0, 4.0], "target": [0.0, 0.0, 0.0], "up": [0.0, 1.0, 0.0] }
            ]
        }"#;
        let registry = ViewpointRegistry::from_json_str(json).unwrap();
        assert_eq!(registry.default_key(), "GATE");
        assert_eq!(registry.label("GATE"), Some("Main Gate"));
    }

    #[test]
    fn missing_default_is_rejected() {
        let yaml = "default: NOPE\npresets:\n  - name: A\n    eye: [0, 0, 1]\n    target: [0, 0, 0]\n    up: [0, 1, 0]\n";
        assert!(matches!(
            ViewpointRegistry::from_yaml_str(yaml),
            Err(RegistryError::MissingDefault(_))
        ));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("campusview_presets_test.toml");
        std::fs::write(&path, "x").unwrap();
        let result = ViewpointRegistry::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(RegistryError::UnsupportedFormat(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = ViewpointRegistry::load("/definitely/not/here/presets.yaml");
        assert!(matches!(result, Err(RegistryError::Io(_))));
    }
}
