//! Feature extraction and key estimation
//!
//! - Chroma: 12-bin pitch-class energy distribution from audio
//! - Key: template correlation over all tonic rotations

pub mod chroma;
pub mod key;
