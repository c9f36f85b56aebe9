//! Whole-clip chroma vector extraction
//!
//! Runs a Hann-windowed STFT over the clip, maps every magnitude bin in the
//! analyzed frequency range to its nearest pitch class, and sums the energy
//! across all frames into one 12-bin vector.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

use crate::config::ChromaConfig;
use crate::error::KeyError;
use crate::pitch_class::PitchClassVector;

/// A4 MIDI note number, reference for frequency-to-pitch mapping
const MIDI_A4: f64 = 69.0;

/// Extract a normalized pitch-class energy vector from audio samples
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `config` - STFT and frequency-range parameters
///
/// # Returns
///
/// A 12-bin vector summing to 1.0, index 0 = C.
///
/// # Errors
///
/// * `KeyError::InvalidAudioInput` - empty buffer, non-finite samples, or
///   zero sample rate
/// * `KeyError::InvalidConfig` - degenerate frame size or zero hop size
/// * `KeyError::NoEnergyDetected` - the clip carries no energy in the
///   analyzed range, so the distribution is undefined
pub fn extract_chroma(
    samples: &[f32],
    sample_rate: u32,
    config: &ChromaConfig,
) -> Result<PitchClassVector, KeyError> {
    log::debug!(
        "Extracting chroma: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    if samples.is_empty() {
        return Err(KeyError::InvalidAudioInput(
            "Empty audio samples".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(KeyError::InvalidAudioInput(
            "Sample rate must be positive".to_string(),
        ));
    }
    if samples.iter().any(|s| !s.is_finite()) {
        return Err(KeyError::InvalidAudioInput(
            "Sample buffer contains non-finite values".to_string(),
        ));
    }

    let frame_size = config.frame_size;
    if frame_size < 2 || config.hop_size == 0 {
        return Err(KeyError::InvalidConfig(format!(
            "Unusable STFT parameters: frame_size={}, hop_size={}",
            frame_size, config.hop_size
        )));
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(frame_size);

    let hann: Vec<f64> = (0..frame_size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / (frame_size - 1) as f64).cos()))
        .collect();

    // Map each positive-frequency bin to a pitch class once, outside the
    // frame loop. Bins outside [min_frequency, max_frequency] are ignored.
    let freq_resolution = sample_rate as f64 / frame_size as f64;
    let bin_to_class: Vec<Option<usize>> = (0..frame_size / 2)
        .map(|bin| {
            let freq = bin as f64 * freq_resolution;
            if freq < config.min_frequency || freq > config.max_frequency {
                return None;
            }
            let midi_pitch = MIDI_A4 + 12.0 * (freq / config.tuning_frequency).log2();
            let pitch_class = ((midi_pitch.round() as i64 % 12) + 12) % 12;
            Some(pitch_class as usize)
        })
        .collect();

    let mut bins = [0.0f64; 12];
    let mut buffer = vec![Complex::new(0.0f64, 0.0f64); frame_size];

    // Clips shorter than one frame are zero-padded into a single frame so a
    // short but valid buffer still yields a distribution.
    let mut offset = 0usize;
    let mut frames = 0usize;
    loop {
        let end = (offset + frame_size).min(samples.len());
        if offset >= samples.len() || (frames > 0 && end - offset < frame_size) {
            break;
        }

        for (i, slot) in buffer.iter_mut().enumerate() {
            let s = if offset + i < samples.len() {
                samples[offset + i] as f64
            } else {
                0.0
            };
            *slot = Complex::new(s * hann[i], 0.0);
        }

        fft.process(&mut buffer);

        for (bin, value) in buffer.iter().enumerate().take(frame_size / 2) {
            if let Some(class) = bin_to_class[bin] {
                bins[class] += value.norm_sqr();
            }
        }

        frames += 1;
        offset += config.hop_size;
    }

    log::debug!("Accumulated chroma over {} frames", frames);

    PitchClassVector::new(bins)
        .normalized()
        .ok_or(KeyError::NoEnergyDetected)
}
