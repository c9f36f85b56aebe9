//! Template learning from a labeled MIDI corpus
//!
//! The corpus root holds one subdirectory per mode; each subdirectory holds
//! MIDI files whose filename starts with the piece's tonic ("C song.mid",
//! "F# etude.mid"). Every note is folded to a tonic-relative pitch class,
//! per-file histograms are summed per mode, and the aggregate is normalized
//! into one template per mode.
//!
//! Per-file problems (unknown tonic, unparseable score, no notes) are logged
//! and skipped so a large corpus run completes with partial results. Only a
//! missing corpus root is fatal.

use std::fs;
use std::path::Path;

use midly::{MidiMessage, Smf, TrackEventKind};

use super::note_names::tonic_pitch_class;
use super::{ModeTemplate, TemplateSet};
use crate::error::KeyError;
use crate::pitch_class::PitchClassVector;

/// Learn one template per mode from a corpus directory
///
/// # Arguments
///
/// * `corpus_root` - Directory whose immediate subdirectories are mode names
///
/// # Returns
///
/// A [`TemplateSet`] with one normalized, tonic-relative template per mode
/// that yielded at least one usable file. Modes with no usable files are
/// omitted (logged), not represented as zero vectors.
///
/// # Errors
///
/// `KeyError::CorpusNotFound` when the corpus root does not exist or cannot
/// be read.
pub fn learn_templates(corpus_root: &Path) -> Result<TemplateSet, KeyError> {
    log::debug!("Learning templates from {}", corpus_root.display());

    let entries = fs::read_dir(corpus_root)
        .map_err(|e| KeyError::CorpusNotFound(format!("{}: {}", corpus_root.display(), e)))?;

    let mut set = TemplateSet::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| KeyError::CorpusNotFound(format!("{}: {}", corpus_root.display(), e)))?;
        let mode_path = entry.path();
        if !mode_path.is_dir() {
            continue;
        }
        let mode_name = entry.file_name().to_string_lossy().into_owned();

        match learn_mode(&mode_path, &mode_name) {
            Ok(template) => {
                set.insert(mode_name, template);
            }
            Err(KeyError::EmptyModeCorpus(_)) => {
                log::warn!("No usable score files in mode directory {}", mode_name);
            }
            Err(e) => return Err(e),
        }
    }

    if set.is_empty() {
        log::warn!("No templates extracted from {}", corpus_root.display());
    }
    Ok(set)
}

/// Aggregate every usable file in one mode directory into a template
fn learn_mode(mode_path: &Path, mode_name: &str) -> Result<ModeTemplate, KeyError> {
    let entries = fs::read_dir(mode_path)
        .map_err(|e| KeyError::CorpusNotFound(format!("{}: {}", mode_path.display(), e)))?;

    let mut aggregate = [0.0f64; 12];
    let mut files_used = 0usize;

    for entry in entries {
        let entry = entry
            .map_err(|e| KeyError::CorpusNotFound(format!("{}: {}", mode_path.display(), e)))?;
        let path = entry.path();
        if !is_midi_file(&path) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();

        // The leading whitespace-delimited token names the tonic
        let tonic_token = match file_name.split_whitespace().next() {
            Some(token) => token,
            None => continue,
        };
        let tonic = match tonic_pitch_class(tonic_token) {
            Ok(pc) => pc,
            Err(e) => {
                log::warn!("Skipping {}: {}", file_name, e);
                continue;
            }
        };

        let histogram = match score_histogram(&path, tonic) {
            Ok(hist) => hist,
            Err(e) => {
                log::warn!("Skipping {}: {}", file_name, e);
                continue;
            }
        };
        if histogram.iter().all(|&v| v == 0.0) {
            log::warn!("Skipping {}: score contains no notes", file_name);
            continue;
        }

        for (slot, v) in aggregate.iter_mut().zip(histogram.iter()) {
            *slot += v;
        }
        files_used += 1;
    }

    if files_used == 0 {
        return Err(KeyError::EmptyModeCorpus(mode_name.to_string()));
    }

    log::debug!("Mode {}: aggregated {} files", mode_name, files_used);

    // files_used > 0 implies a non-zero aggregate, so normalization holds
    let vector = PitchClassVector::new(aggregate)
        .normalized()
        .ok_or_else(|| KeyError::EmptyModeCorpus(mode_name.to_string()))?;
    Ok(ModeTemplate::new(vector))
}

fn is_midi_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                ext == "mid" || ext == "midi"
            })
            .unwrap_or(false)
}

/// Count every note of one score into a tonic-relative histogram
///
/// Single notes and every note inside a chord are separate note-on events;
/// rests produce no events and contribute nothing.
fn score_histogram(path: &Path, tonic: usize) -> Result<[f64; 12], KeyError> {
    let bytes = fs::read(path)
        .map_err(|e| KeyError::UnparseableScore(format!("{}: {}", path.display(), e)))?;
    let smf = Smf::parse(&bytes)
        .map_err(|e| KeyError::UnparseableScore(format!("{}: {}", path.display(), e)))?;

    let mut histogram = [0.0f64; 12];
    for track in &smf.tracks {
        for event in track {
            if let TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } = event.kind
            {
                // NoteOn with zero velocity is a running-status note-off
                if vel.as_int() == 0 {
                    continue;
                }
                let pitch_class = key.as_int() as usize % 12;
                histogram[(pitch_class + 12 - tonic) % 12] += 1.0;
            }
        }
    }
    Ok(histogram)
}
