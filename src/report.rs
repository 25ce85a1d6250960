use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::data::model::{MetadataValue, Spectrum};
use crate::detect::{Detection, DetectionConfig, ScoredPeak};

// ---------------------------------------------------------------------------
// Human-readable listing
// ---------------------------------------------------------------------------

/// One-line summary of the thresholds, e.g. `≥4% drop and ≥0.0100 absolute drop`.
pub fn criteria_description(config: &DetectionConfig) -> String {
    let mut desc = format!("≥{}% drop", config.min_drop_percent);
    if let Some(abs) = config.min_abs_drop {
        let _ = write!(desc, " and ≥{abs:.4} absolute drop");
    }
    desc
}

/// Text report for one spectrum: counts, criteria and the ranked peaks.
pub fn render_text(label: &str, detection: &Detection, config: &DetectionConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {label}");
    let _ = writeln!(
        out,
        "Found {} local minima, {} meet threshold criteria",
        detection.minima_count, detection.filtered_count
    );
    if detection.skipped_undefined_ratio > 0 {
        let _ = writeln!(
            out,
            "Skipped {} minima with zero or non-finite background",
            detection.skipped_undefined_ratio
        );
    }
    if config.proximity_threshold > 0 && detection.deduplicated_count > 0 {
        let _ = writeln!(
            out,
            "After proximity filtering (threshold={} points): {} peaks",
            config.proximity_threshold, detection.deduplicated_count
        );
    }
    let _ = writeln!(
        out,
        "Found {} absorption peaks with {}:",
        detection.deduplicated_count,
        criteria_description(config)
    );
    for (i, peak) in detection.peaks.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, peak_line(peak));
    }
    let hidden = detection
        .deduplicated_count
        .saturating_sub(detection.peaks.len());
    if hidden > 0 {
        let _ = writeln!(out, "... and {hidden} more");
    }
    out
}

fn peak_line(peak: &ScoredPeak) -> String {
    let c = &peak.candidate;
    format!(
        "Wavelength: {:.2} nm, Drop: {:.2}%, Abs Drop: {:.4}, Score: {:.2}",
        c.wavelength, c.drop_percent, c.abs_drop, peak.hybrid_score
    )
}

// ---------------------------------------------------------------------------
// Machine-readable report
// ---------------------------------------------------------------------------

/// JSON shape emitted by `--json`, one per analysed spectrum.
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumReport<'a> {
    pub label: String,
    pub metadata: &'a BTreeMap<String, MetadataValue>,
    pub samples: usize,
    pub criteria: String,
    pub minima_count: usize,
    pub filtered_count: usize,
    pub deduplicated_count: usize,
    pub skipped_undefined_ratio: usize,
    pub peaks: &'a [ScoredPeak],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'a [f64]>,
}

impl<'a> SpectrumReport<'a> {
    pub fn new(
        label: String,
        spectrum: &'a Spectrum,
        detection: &'a Detection,
        config: &DetectionConfig,
        with_background: bool,
    ) -> Self {
        SpectrumReport {
            label,
            metadata: &spectrum.metadata,
            samples: spectrum.len(),
            criteria: criteria_description(config),
            minima_count: detection.minima_count,
            filtered_count: detection.filtered_count,
            deduplicated_count: detection.deduplicated_count,
            skipped_undefined_ratio: detection.skipped_undefined_ratio,
            peaks: &detection.peaks,
            background: with_background.then_some(detection.background.as_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::find_absorption_peaks;

    fn dips() -> (Vec<f64>, Vec<f64>) {
        let y = vec![
            10.0, 10.0, 10.0, 10.0, 2.0, 10.0, 10.0, 10.0, 10.0, 1.0, 10.0, 10.0, 10.0, 10.0,
        ];
        let x = (0..y.len()).map(|i| i as f64).collect();
        (x, y)
    }

    #[test]
    fn criteria_say_and_when_both_thresholds_apply() {
        let mut config = DetectionConfig {
            min_drop_percent: 4.0,
            ..DetectionConfig::default()
        };
        assert_eq!(criteria_description(&config), "≥4% drop");
        config.min_abs_drop = Some(0.01);
        assert_eq!(
            criteria_description(&config),
            "≥4% drop and ≥0.0100 absolute drop"
        );
    }

    #[test]
    fn text_lists_ranked_peaks_and_overflow() {
        let (x, y) = dips();
        let config = DetectionConfig {
            window_size: 5,
            min_drop_percent: 10.0,
            max_peaks: 1,
            proximity_threshold: 2,
            ..DetectionConfig::default()
        };
        let d = find_absorption_peaks(&x, &y, &config).unwrap();
        let text = render_text("synthetic", &d, &config);
        assert!(text.starts_with("== synthetic\n"));
        assert!(text.contains("Found 2 local minima, 2 meet threshold criteria"));
        assert!(text.contains("1. Wavelength: 9.00 nm"));
        assert!(text.contains("Score: 1.00"));
        assert!(text.contains("... and 1 more"));
    }

    #[test]
    fn proximity_line_is_omitted_when_nothing_survives() {
        let (x, y) = dips();
        let config = DetectionConfig {
            window_size: 5,
            min_drop_percent: 99.0,
            proximity_threshold: 2,
            ..DetectionConfig::default()
        };
        let d = find_absorption_peaks(&x, &y, &config).unwrap();
        assert_eq!(d.deduplicated_count, 0);
        let text = render_text("synthetic", &d, &config);
        assert!(!text.contains("After proximity filtering"));
        assert!(text.contains("Found 0 absorption peaks"));

        let kept = DetectionConfig {
            min_drop_percent: 10.0,
            ..config
        };
        let d = find_absorption_peaks(&x, &y, &kept).unwrap();
        assert!(render_text("synthetic", &d, &kept)
            .contains("After proximity filtering (threshold=2 points): 2 peaks"));
    }

    #[test]
    fn json_report_flattens_peak_fields() {
        let (x, y) = dips();
        let config = DetectionConfig {
            window_size: 5,
            ..DetectionConfig::default()
        };
        let d = find_absorption_peaks(&x, &y, &config).unwrap();
        let sp = Spectrum::new(x, y);
        let report = SpectrumReport::new("s".into(), &sp, &d, &config, false);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["samples"], 14);
        assert!(value.get("background").is_none());
        assert_eq!(value["peaks"][0]["index"], 9);
        assert!(value["peaks"][0]["hybrid_score"].is_number());
    }
}
