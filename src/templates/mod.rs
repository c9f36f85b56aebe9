//! Mode templates
//!
//! A mode template is a tonic-relative pitch-class distribution learned from
//! a labeled corpus. Templates are produced once by the learner, persisted
//! through the store, and read-only thereafter.

pub mod learner;
pub mod note_names;
pub mod store;

pub use learner::learn_templates;
pub use store::TemplateStore;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pitch_class::PitchClassVector;

/// Tonic-relative reference distribution for one mode
///
/// The tonic's expected energy sits at index 0 regardless of which key the
/// template is later rotated to test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTemplate(PitchClassVector);

impl ModeTemplate {
    /// Wrap a distribution as a template
    pub fn new(vector: PitchClassVector) -> Self {
        Self(vector)
    }

    /// The underlying 12-bin distribution
    pub fn vector(&self) -> &PitchClassVector {
        &self.0
    }
}

/// Persisted shape of one template: 12 named fields in pitch-class order
///
/// Matches the storage schema exactly, so the JSON carries "C", "C#", ... "B"
/// keys rather than a bare array.
#[derive(Debug, Serialize, Deserialize)]
struct TemplateRecord {
    #[serde(rename = "C")]
    c: f64,
    #[serde(rename = "C#")]
    cs: f64,
    #[serde(rename = "D")]
    d: f64,
    #[serde(rename = "D#")]
    ds: f64,
    #[serde(rename = "E")]
    e: f64,
    #[serde(rename = "F")]
    f: f64,
    #[serde(rename = "F#")]
    fs: f64,
    #[serde(rename = "G")]
    g: f64,
    #[serde(rename = "G#")]
    gs: f64,
    #[serde(rename = "A")]
    a: f64,
    #[serde(rename = "A#")]
    r#as: f64,
    #[serde(rename = "B")]
    b: f64,
}

impl From<&ModeTemplate> for TemplateRecord {
    fn from(template: &ModeTemplate) -> Self {
        let bins = template.vector().bins();
        Self {
            c: bins[0],
            cs: bins[1],
            d: bins[2],
            ds: bins[3],
            e: bins[4],
            f: bins[5],
            fs: bins[6],
            g: bins[7],
            gs: bins[8],
            a: bins[9],
            r#as: bins[10],
            b: bins[11],
        }
    }
}

impl From<TemplateRecord> for ModeTemplate {
    fn from(record: TemplateRecord) -> Self {
        ModeTemplate::new(PitchClassVector::new([
            record.c,
            record.cs,
            record.d,
            record.ds,
            record.e,
            record.f,
            record.fs,
            record.g,
            record.gs,
            record.a,
            record.r#as,
            record.b,
        ]))
    }
}

/// Mapping from mode name to template
///
/// Backed by a BTreeMap so iteration order is deterministic (sorted by mode
/// name), which fixes the estimator's tie-break enumeration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateSet {
    modes: BTreeMap<String, ModeTemplate>,
}

impl TemplateSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the template for a mode
    pub fn insert(&mut self, mode: String, template: ModeTemplate) {
        self.modes.insert(mode, template);
    }

    /// Template for a mode, if present
    pub fn get(&self, mode: &str) -> Option<&ModeTemplate> {
        self.modes.get(mode)
    }

    /// Number of modes
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// True if the set holds no templates
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Iterate (mode name, template) in deterministic sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModeTemplate)> {
        self.modes.iter().map(|(name, t)| (name.as_str(), t))
    }

    /// Reduced two-mode view holding only "major" and "minor"
    ///
    /// Used when a caller wants the more robust classic classification
    /// instead of every learned mode.
    pub fn simplified(&self) -> TemplateSet {
        let modes = self
            .modes
            .iter()
            .filter(|(name, _)| name.as_str() == "major" || name.as_str() == "minor")
            .map(|(name, t)| (name.clone(), *t))
            .collect();
        TemplateSet { modes }
    }
}
