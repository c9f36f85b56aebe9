//! Pitch-class vectors
//!
//! A pitch-class vector is the shared data model of both pipelines: 12
//! non-negative bins, index 0 = C ascending by semitone. Feature extraction
//! produces one per clip, the learner produces one per mode template.

/// Pitch class names in fixed chromatic order (index 0 = C)
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Ordered sequence of 12 non-negative pitch-class energies
///
/// When used as a probability-like distribution the bins sum to 1.0 (within
/// floating tolerance); an all-zero vector is the degenerate no-signal case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchClassVector([f64; 12]);

impl PitchClassVector {
    /// Create a vector from raw bin values
    pub fn new(bins: [f64; 12]) -> Self {
        Self(bins)
    }

    /// All-zero vector (degenerate case)
    pub fn zero() -> Self {
        Self([0.0; 12])
    }

    /// Bin values in chromatic order
    pub fn bins(&self) -> &[f64; 12] {
        &self.0
    }

    /// Sum of all bins
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True if every bin is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Divide every bin by the total so the vector sums to 1.0
    ///
    /// Returns `None` for an all-zero vector instead of dividing by zero.
    pub fn normalized(&self) -> Option<Self> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        let mut bins = self.0;
        for v in bins.iter_mut() {
            *v /= total;
        }
        Some(Self(bins))
    }

    /// Cyclic left rotation by `offset` places: `T[offset:] ++ T[:offset]`
    ///
    /// Rotating a tonic-relative template by i produces the candidate profile
    /// for the mode with tonic at pitch class i. Rotation by 12 is the
    /// identity.
    pub fn rotated(&self, offset: usize) -> Self {
        let mut bins = [0.0; 12];
        for (j, v) in bins.iter_mut().enumerate() {
            *v = self.0[(j + offset) % 12];
        }
        Self(bins)
    }
}

impl std::ops::Index<usize> for PitchClassVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}
