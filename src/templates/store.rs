//! Template persistence
//!
//! Templates are stored as a JSON object mapping mode name to a 12-field
//! object keyed by pitch-class name. The storage location is always supplied
//! by the caller. Values are rounded to four decimal places at write time
//! (the reference precision); loading reproduces the stored values exactly.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ModeTemplate, TemplateRecord, TemplateSet};
use crate::error::KeyError;

/// Load/save access to one persisted template file
#[derive(Debug, Clone)]
pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the template set from storage
    ///
    /// # Errors
    ///
    /// `KeyError::StoreIo` when the file cannot be read or does not decode
    /// as the template schema. An unreadable store is a systemic failure,
    /// surfaced to the caller rather than recovered.
    pub fn load(&self) -> Result<TemplateSet, KeyError> {
        log::debug!("Loading templates from {}", self.path.display());

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| KeyError::StoreIo(format!("{}: {}", self.path.display(), e)))?;
        let records: BTreeMap<String, TemplateRecord> = serde_json::from_str(&contents)
            .map_err(|e| KeyError::StoreIo(format!("{}: {}", self.path.display(), e)))?;

        let mut set = TemplateSet::new();
        for (mode, record) in records {
            set.insert(mode, ModeTemplate::from(record));
        }
        log::debug!("Loaded {} mode templates", set.len());
        Ok(set)
    }

    /// Write the template set to storage, pretty-printed
    ///
    /// Bins are rounded to four decimal places at write time. A fraction in
    /// [0, 1] at that precision survives the JSON round trip bit-exactly.
    ///
    /// # Errors
    ///
    /// `KeyError::StoreIo` when serialization or the write fails.
    pub fn save(&self, templates: &TemplateSet) -> Result<(), KeyError> {
        log::debug!(
            "Saving {} mode templates to {}",
            templates.len(),
            self.path.display()
        );

        let records: BTreeMap<&str, TemplateRecord> = templates
            .iter()
            .map(|(mode, template)| (mode, TemplateRecord::from(&round_template(template))))
            .collect();
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| KeyError::StoreIo(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| KeyError::StoreIo(format!("{}: {}", self.path.display(), e)))
    }
}

/// Round every bin to the stored precision of four decimal places
fn round_template(template: &ModeTemplate) -> ModeTemplate {
    let mut bins = *template.vector().bins();
    for v in bins.iter_mut() {
        *v = (*v * 10_000.0).round() / 10_000.0;
    }
    ModeTemplate::new(crate::pitch_class::PitchClassVector::new(bins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch_class::PitchClassVector;

    fn sample_set() -> TemplateSet {
        let mut set = TemplateSet::new();
        set.insert(
            "major".to_string(),
            ModeTemplate::new(PitchClassVector::new([
                0.1508, 0.0101, 0.1205, 0.0102, 0.1304, 0.1106, 0.0103, 0.1307, 0.0104, 0.1209,
                0.0105, 0.0956,
            ])),
        );
        set.insert(
            "minor".to_string(),
            ModeTemplate::new(PitchClassVector::new([
                0.1401, 0.0101, 0.1102, 0.1203, 0.0104, 0.1105, 0.0106, 0.1307, 0.1008, 0.0109,
                0.0910, 0.1554,
            ])),
        );
        set
    }

    #[test]
    fn test_round_trip_reproduces_values() {
        // Sample values are already at the stored 4-decimal precision, so
        // the round trip must be exact.
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("pitch_profiles.json"));

        let original = sample_set();
        store.save(&original).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.len(), original.len());
        for (mode, template) in original.iter() {
            let reloaded = loaded.get(mode).expect("mode survives round trip");
            for i in 0..12 {
                assert_eq!(reloaded.vector()[i], template.vector()[i]);
            }
        }
    }

    #[test]
    fn test_json_uses_pitch_class_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pitch_profiles.json");
        let store = TemplateStore::new(&path);
        store.save(&sample_set()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let major = value.get("major").unwrap().as_object().unwrap();
        assert_eq!(major.len(), 12);
        for name in ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"] {
            assert!(major.contains_key(name), "missing field {}", name);
        }
    }

    #[test]
    fn test_save_rounds_to_four_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("pitch_profiles.json"));

        let mut bins = [0.0f64; 12];
        bins[0] = 0.123456;
        bins[1] = 0.876544;
        let mut set = TemplateSet::new();
        set.insert(
            "major".to_string(),
            ModeTemplate::new(PitchClassVector::new(bins)),
        );

        store.save(&set).unwrap();
        let loaded = store.load().unwrap();
        let template = loaded.get("major").unwrap();
        assert_eq!(template.vector()[0], 0.1235);
        assert_eq!(template.vector()[1], 0.8765);
    }

    #[test]
    fn test_missing_file_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load(), Err(KeyError::StoreIo(_))));
    }

    #[test]
    fn test_malformed_json_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"major\": [0.1, 0.2]}").unwrap();
        let store = TemplateStore::new(&path);
        assert!(matches!(store.load(), Err(KeyError::StoreIo(_))));
    }
}
