//! Error types for key estimation and template learning

use std::fmt;

/// Errors that can occur during key estimation or template learning
#[derive(Debug, Clone)]
pub enum KeyError {
    /// Audio input is not a usable sample buffer (empty, non-finite, bad rate)
    InvalidAudioInput(String),

    /// Extraction parameters are unusable (zero hop, degenerate frame size)
    InvalidConfig(String),

    /// The clip carried no spectral energy; the chroma vector is all-zero
    NoEnergyDetected,

    /// A symbolic score file could not be parsed
    UnparseableScore(String),

    /// A filename's tonic token does not map to any pitch class
    UnknownTonicName(String),

    /// A mode directory yielded no usable histograms
    EmptyModeCorpus(String),

    /// The corpus root does not exist or is not a directory
    CorpusNotFound(String),

    /// The template store could not be read or written
    StoreIo(String),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::InvalidAudioInput(msg) => write!(f, "Invalid audio input: {}", msg),
            KeyError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            KeyError::NoEnergyDetected => write!(f, "No energy detected in audio"),
            KeyError::UnparseableScore(msg) => write!(f, "Unparseable score: {}", msg),
            KeyError::UnknownTonicName(msg) => write!(f, "Unknown tonic name: {}", msg),
            KeyError::EmptyModeCorpus(msg) => write!(f, "Empty mode corpus: {}", msg),
            KeyError::CorpusNotFound(msg) => write!(f, "Corpus not found: {}", msg),
            KeyError::StoreIo(msg) => write!(f, "Template store I/O error: {}", msg),
        }
    }
}

impl std::error::Error for KeyError {}
