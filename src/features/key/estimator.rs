//! Template-correlation key estimation
//!
//! For each mode template and each of the 12 tonic rotations, computes the
//! Pearson correlation between the observed chroma distribution and the
//! rotated template. The enumeration order is fixed (tonic outer loop in
//! chromatic order, mode inner loop in template-set iteration order) and ties
//! keep the first-encountered candidate, so output is deterministic.

use std::collections::BTreeMap;

use super::{KeyCandidate, KeyEstimation};
use crate::pitch_class::{PitchClassVector, PITCH_CLASS_NAMES};
use crate::templates::TemplateSet;

/// Estimate the key of a clip from its chroma distribution
///
/// # Arguments
///
/// * `features` - Normalized 12-bin pitch-class energy vector
/// * `templates` - Tonic-relative mode templates
///
/// # Returns
///
/// A [`KeyEstimation`] holding the best candidate and the full score map.
/// NaN scores (zero variance in either operand) are excluded from the
/// maximum; if every score is NaN the estimation is undetermined.
pub fn estimate_key(features: &PitchClassVector, templates: &TemplateSet) -> KeyEstimation {
    log::debug!(
        "Estimating key against {} mode templates",
        templates.len()
    );

    let mut correlations = BTreeMap::new();
    let mut best: Option<KeyCandidate> = None;

    for tonic in 0..12 {
        for (mode, template) in templates.iter() {
            // T[tonic:] ++ T[:tonic] anchors the template at this tonic
            let rotated = template.vector().rotated(tonic);
            let score = pearson_correlation(features.bins(), rotated.bins());

            let label = format!("{} {}", PITCH_CLASS_NAMES[tonic], mode);
            correlations.insert(label, score);

            if score.is_nan() {
                continue;
            }
            // Strictly greater: first candidate in enumeration order wins ties
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(KeyCandidate {
                    tonic,
                    mode: mode.to_string(),
                    score,
                });
            }
        }
    }

    match &best {
        Some(candidate) => log::debug!(
            "Best key: {} (r = {:.4})",
            candidate.label(),
            candidate.score
        ),
        None => log::debug!("Key undetermined: all correlations are NaN"),
    }

    KeyEstimation::new(best, correlations)
}

/// Pearson correlation coefficient over 12 paired samples
///
/// Standard form: covariance divided by the product of standard deviations.
/// The sample-count factor cancels between numerator and denominator, so this
/// matches both the biased and unbiased conventions (and numpy's corrcoef).
/// Returns NaN when either operand has zero variance.
pub fn pearson_correlation(x: &[f64; 12], y: &[f64; 12]) -> f64 {
    let n = 12.0f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..12 {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // 0/0 when either side is constant; the caller treats NaN as "no match"
    covariance / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::ModeTemplate;

    fn triad_template(degrees: [usize; 3]) -> ModeTemplate {
        let mut bins = [0.05f64; 12];
        for d in degrees {
            bins[d] = 0.5;
        }
        ModeTemplate::new(PitchClassVector::new(bins).normalized().unwrap())
    }

    fn two_mode_set() -> TemplateSet {
        let mut set = TemplateSet::new();
        // Major peaked at the tonic, minor peaked at degree 9 (original
        // profiles carry A-minor shapes relative to C)
        set.insert("major".to_string(), triad_template([0, 4, 7]));
        set.insert("minor".to_string(), triad_template([9, 0, 4]));
        set
    }

    #[test]
    fn test_pearson_identity() {
        let x = [
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0,
        ];
        assert!((pearson_correlation(&x, &x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_negative() {
        let x = [
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0,
        ];
        let y = [
            12.0, 11.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0,
        ];
        assert!((pearson_correlation(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_known_value() {
        // Both vectors are zero-mean with variance 12; the cross products
        // sum to 4, so r = 4/12 = 1/3. Verified against numpy.corrcoef.
        let x = [
            1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0,
        ];
        let y = [
            1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0, -1.0, -1.0,
        ];
        let r = pearson_correlation(&x, &y);
        assert!((r - 1.0 / 3.0).abs() < 1e-7, "got {}", r);
    }

    #[test]
    fn test_pearson_constant_operand_is_nan() {
        let x = [1.0; 12];
        let y = [
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0,
        ];
        assert!(pearson_correlation(&x, &y).is_nan());
        assert!(pearson_correlation(&y, &x).is_nan());
    }

    #[test]
    fn test_pearson_scale_and_shift_invariant() {
        let x = [
            0.3, 0.1, 0.05, 0.02, 0.2, 0.1, 0.01, 0.12, 0.03, 0.04, 0.02, 0.01,
        ];
        let y = [
            0.1, 0.2, 0.3, 0.05, 0.05, 0.1, 0.02, 0.08, 0.02, 0.03, 0.03, 0.02,
        ];
        let mut scaled = x;
        for v in scaled.iter_mut() {
            *v = *v * 3.5 + 0.25;
        }
        let r1 = pearson_correlation(&x, &y);
        let r2 = pearson_correlation(&scaled, &y);
        assert!((r1 - r2).abs() < 1e-12);
    }

    #[test]
    fn test_energy_at_c_selects_c_major() {
        let mut bins = [0.0f64; 12];
        bins[0] = 1.0;
        let features = PitchClassVector::new(bins);

        let estimation = estimate_key(&features, &two_mode_set());
        let best = estimation.best.as_ref().expect("should be determined");
        assert_eq!(best.label(), "C major");
    }

    #[test]
    fn test_candidate_set_is_complete_and_labeled() {
        let mut bins = [0.0f64; 12];
        bins[0] = 1.0;
        let features = PitchClassVector::new(bins);

        let estimation = estimate_key(&features, &two_mode_set());
        let correlations = estimation.all_correlations();
        assert_eq!(correlations.len(), 24);
        assert!(correlations.contains_key("C major"));
        assert!(correlations.contains_key("F# minor"));
        assert!(correlations.contains_key("B major"));
    }

    #[test]
    fn test_estimate_invariant_to_positive_scaling() {
        let bins = [
            0.30, 0.02, 0.10, 0.02, 0.15, 0.12, 0.02, 0.14, 0.02, 0.06, 0.02, 0.03,
        ];
        let features = PitchClassVector::new(bins);
        let mut scaled_bins = bins;
        for v in scaled_bins.iter_mut() {
            *v *= 7.25;
        }
        let scaled = PitchClassVector::new(scaled_bins);

        let templates = two_mode_set();
        let a = estimate_key(&features, &templates);
        let b = estimate_key(&scaled, &templates);
        assert_eq!(a.best_label(), b.best_label());
    }

    #[test]
    fn test_flat_features_are_undetermined() {
        let features = PitchClassVector::new([1.0 / 12.0; 12]);
        let estimation = estimate_key(&features, &two_mode_set());

        assert!(estimation.best.is_none());
        assert!(estimation.best_label().is_none());
        assert!(estimation.all_correlations().values().all(|s| s.is_nan()));
    }

    #[test]
    fn test_degenerate_mode_excluded_but_still_scored() {
        // A zero-variance template yields NaN for all 12 of its rotations.
        // Those candidates must stay out of the maximum without knocking out
        // the healthy mode, and must still show up in the score map.
        let mut templates = two_mode_set();
        templates.insert(
            "uniform".to_string(),
            ModeTemplate::new(PitchClassVector::new([1.0 / 12.0; 12])),
        );

        let mut bins = [0.0f64; 12];
        bins[0] = 1.0;
        let features = PitchClassVector::new(bins);

        let estimation = estimate_key(&features, &templates);
        let best = estimation.best.as_ref().expect("healthy modes still win");
        assert_eq!(best.label(), "C major");

        let correlations = estimation.all_correlations();
        assert_eq!(correlations.len(), 36);
        let nan_count = correlations.values().filter(|s| s.is_nan()).count();
        assert_eq!(nan_count, 12);
        assert!(correlations["C uniform"].is_nan());
        assert!(correlations["F# uniform"].is_nan());
    }

    #[test]
    fn test_empty_template_set_is_undetermined() {
        let mut bins = [0.0f64; 12];
        bins[5] = 1.0;
        let features = PitchClassVector::new(bins);
        let estimation = estimate_key(&features, &TemplateSet::new());
        assert!(estimation.best.is_none());
        assert!(estimation.all_correlations().is_empty());
    }

    #[test]
    fn test_rotated_features_select_rotated_key() {
        // Same shape as the major template, re-anchored at G (7). Under the
        // left-rotation convention, features built as template.rotated(7)
        // match the candidate labeled with tonic 7.
        let templates = two_mode_set();
        let major = templates.get("major").unwrap().vector();
        let features = major.rotated(7);

        let estimation = estimate_key(&features, &templates);
        assert_eq!(estimation.best_label().as_deref(), Some("G major"));
    }
}
