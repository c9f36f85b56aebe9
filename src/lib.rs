//! # Keyscope
//!
//! Musical key estimation by pitch-class profile correlation, plus the
//! template-learning pipeline that produces the profiles from a labeled
//! MIDI corpus.
//!
//! ## Features
//!
//! - **Chroma extraction**: whole-clip 12-bin pitch-class energy vector
//! - **Key estimation**: Pearson correlation against every rotation of every
//!   mode template, with a deterministic tie-break
//! - **Template learning**: per-mode, tonic-relative profiles aggregated from
//!   labeled MIDI scores
//! - **Template store**: JSON persistence with pitch-class-named fields
//!
//! ## Quick Start
//!
//! ```no_run
//! use keyscope::{estimate_key_from_audio, ChromaConfig, TemplateStore};
//!
//! let samples: Vec<f32> = vec![]; // Decoded mono audio
//! let sample_rate = 44100;
//!
//! let templates = TemplateStore::new("pitch_profiles.json").load()?;
//! let estimation = estimate_key_from_audio(
//!     &samples,
//!     sample_rate,
//!     &templates,
//!     &ChromaConfig::default(),
//! )?;
//!
//! match estimation.best_label() {
//!     Some(label) => println!("Key: {}", label),
//!     None => println!("Key undetermined"),
//! }
//! # Ok::<(), keyscope::KeyError>(())
//! ```
//!
//! ## Architecture
//!
//! Two independent pipelines share the pitch-class vector data model:
//!
//! ```text
//! Audio -> Chroma Extractor -> Key Estimator <- Template Store <- Template Learner <- Corpus
//! ```
//!
//! Decoding container formats to samples, and anything done with the
//! resulting key label (renaming, tagging), are the caller's concern.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod features;
pub mod pitch_class;
pub mod templates;

// Re-export main types
pub use config::ChromaConfig;
pub use error::KeyError;
pub use features::chroma::extract_chroma;
pub use features::key::{estimate_key, KeyCandidate, KeyEstimation};
pub use pitch_class::{PitchClassVector, PITCH_CLASS_NAMES};
pub use templates::{learn_templates, ModeTemplate, TemplateSet, TemplateStore};

/// Estimate the key of a decoded clip in one call
///
/// Chains chroma extraction and template correlation. Both stages are pure
/// functions of their inputs; the call holds no state between invocations.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `templates` - Mode templates, typically loaded via [`TemplateStore`]
/// * `config` - Chroma extraction parameters
///
/// # Errors
///
/// * `KeyError::InvalidAudioInput` - unusable sample buffer or sample rate
/// * `KeyError::NoEnergyDetected` - the clip carries no spectral energy
pub fn estimate_key_from_audio(
    samples: &[f32],
    sample_rate: u32,
    templates: &TemplateSet,
    config: &ChromaConfig,
) -> Result<KeyEstimation, KeyError> {
    log::debug!(
        "Estimating key: {} samples at {} Hz, {} mode templates",
        samples.len(),
        sample_rate,
        templates.len()
    );

    let features = extract_chroma(samples, sample_rate, config)?;
    Ok(estimate_key(&features, templates))
}
