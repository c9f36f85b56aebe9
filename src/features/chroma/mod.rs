//! Chroma extraction
//!
//! Converts a decoded waveform into a single normalized 12-bin pitch-class
//! energy vector covering the whole clip.

pub mod extractor;

pub use extractor::extract_chroma;
