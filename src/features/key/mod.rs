//! Key estimation
//!
//! Correlates an observed chroma distribution against every rotation of every
//! mode template and selects the best-scoring (tonic, mode) pair.

pub mod estimator;

pub use estimator::{estimate_key, pearson_correlation};

use std::collections::BTreeMap;

use crate::pitch_class::PITCH_CLASS_NAMES;

/// One (tonic, mode) pair with its correlation score
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCandidate {
    /// Tonic pitch class (0 = C, ..., 11 = B)
    pub tonic: usize,

    /// Mode name, e.g. "major" or "minor"
    pub mode: String,

    /// Pearson correlation in [-1, 1]
    pub score: f64,
}

impl KeyCandidate {
    /// Key label in `"<TonicName> <modeName>"` form, e.g. `"C# major"`
    pub fn label(&self) -> String {
        format!("{} {}", PITCH_CLASS_NAMES[self.tonic % 12], self.mode)
    }
}

/// Result of one key estimation run
///
/// `best` is `None` when every candidate correlation is NaN (degenerate
/// feature vector); that state is surfaced explicitly rather than defaulting
/// to an arbitrary key.
#[derive(Debug, Clone)]
pub struct KeyEstimation {
    /// Best-scoring candidate, or `None` if undetermined
    pub best: Option<KeyCandidate>,

    correlations: BTreeMap<String, f64>,
}

impl KeyEstimation {
    pub(crate) fn new(best: Option<KeyCandidate>, correlations: BTreeMap<String, f64>) -> Self {
        Self { best, correlations }
    }

    /// All candidate scores keyed by `"<TonicName> <modeName>"` label
    ///
    /// Contains 12 × |modes| entries; degenerate candidates score NaN.
    pub fn all_correlations(&self) -> &BTreeMap<String, f64> {
        &self.correlations
    }

    /// Label of the best candidate, or `None` if undetermined
    pub fn best_label(&self) -> Option<String> {
        self.best.as_ref().map(KeyCandidate::label)
    }
}
