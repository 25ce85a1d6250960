use serde::Serialize;

use super::background::estimate_background;
use super::config::DetectionConfig;
use super::dedup::deduplicate;
use super::error::{DetectError, DetectResult};
use super::minima::find_local_minima;
use super::score::{rank_by_score, score, ScoredPeak};
use super::select::select_top;
use super::threshold::filter_candidates;

// ---------------------------------------------------------------------------
// Detection – everything one run produces
// ---------------------------------------------------------------------------

/// Result of [`find_absorption_peaks`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Moving-average background, same length as the input.
    pub background: Vec<f64>,
    /// Peaks ranked by descending `hybrid_score`, at most `max_peaks` long.
    pub peaks: Vec<ScoredPeak>,
    /// Strict local minima found (excluding those with an undefined ratio).
    pub minima_count: usize,
    /// Minima that passed the drop thresholds.
    pub filtered_count: usize,
    /// Peaks left after proximity merging, before truncation.
    pub deduplicated_count: usize,
    /// Strict minima skipped because their drop ratio is undefined (zero or
    /// non-finite background).
    pub skipped_undefined_ratio: usize,
}

/// Run the full detection pipeline on one spectrum.
///
/// background → strict minima → thresholds → scores → proximity merge →
/// top `max_peaks`. The inputs must be the same non-zero length and are
/// expected in ascending wavelength order.
pub fn find_absorption_peaks(
    wavelength: &[f64],
    intensity: &[f64],
    config: &DetectionConfig,
) -> DetectResult<Detection> {
    config.validate()?;
    if wavelength.len() != intensity.len() {
        return Err(DetectError::LengthMismatch {
            wavelengths: wavelength.len(),
            intensities: intensity.len(),
        });
    }
    if intensity.is_empty() {
        return Err(DetectError::EmptyInput);
    }

    let background = estimate_background(intensity, config.window_size)?;

    let minima = find_local_minima(wavelength, intensity, &background);
    let filtered = filter_candidates(
        &minima.candidates,
        config.min_drop_percent,
        config.min_abs_drop,
    );
    log::info!(
        "Found {} local minima, {} meet threshold criteria",
        minima.candidates.len(),
        filtered.len()
    );
    if minima.skipped_undefined_ratio > 0 {
        log::warn!(
            "{} minima skipped because their background is zero or not finite",
            minima.skipped_undefined_ratio
        );
    }

    let mut scored: Vec<ScoredPeak> = score(&filtered);
    rank_by_score(&mut scored);

    let merged = deduplicate(scored, config.proximity_threshold);
    if config.proximity_threshold > 0 && !merged.is_empty() {
        log::info!(
            "After proximity filtering (threshold={} points): {} peaks",
            config.proximity_threshold,
            merged.len()
        );
    }

    let peaks = select_top(&merged, config.max_peaks);

    Ok(Detection {
        background,
        minima_count: minima.candidates.len(),
        filtered_count: filtered.len(),
        deduplicated_count: merged.len(),
        skipped_undefined_ratio: minima.skipped_undefined_ratio,
        peaks,
    })
}
