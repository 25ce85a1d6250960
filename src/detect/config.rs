use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::{DetectError, DetectResult};

// ---------------------------------------------------------------------------
// DetectionConfig – the tunables of one detection run
// ---------------------------------------------------------------------------

/// Options recognised by [`super::find_absorption_peaks`].
///
/// Every field has a default, so a JSON file only needs to name the values
/// it changes:
///
/// ```json
/// { "window_size": 25, "min_drop_percent": 4.0, "min_abs_drop": 0.01 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Moving-average window in samples. Even values are bumped to the next
    /// odd value; zero or negative is rejected.
    pub window_size: i64,

    /// Minimum drop below the background, in percent of the background.
    pub min_drop_percent: f64,

    /// Optional minimum absolute drop. When set, a dip must pass both this
    /// and `min_drop_percent`.
    pub min_abs_drop: Option<f64>,

    /// Number of ranked peaks to return.
    ///
    /// **Zero or negative returns no peaks at all.** It does not mean
    /// "unlimited"; pass a large value for that.
    pub max_peaks: i64,

    /// Two peaks whose indices differ by at most this many samples are
    /// merged, keeping the higher score. Zero or negative disables merging.
    pub proximity_threshold: i64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window_size: 15,
            min_drop_percent: 1.0,
            min_abs_drop: None,
            max_peaks: 15,
            proximity_threshold: 5,
        }
    }
}

/// Values given explicitly on the command line. `None` leaves the
/// underlying setting alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub window_size: Option<i64>,
    pub min_drop_percent: Option<f64>,
    pub min_abs_drop: Option<f64>,
    pub max_peaks: Option<i64>,
    pub proximity_threshold: Option<i64>,
}

impl DetectionConfig {
    /// Load `file` (or the defaults), apply `overrides` on top and validate
    /// the merged result.
    pub fn resolve(file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let base = match file {
            Some(path) => DetectionConfig::from_json_file(path)?,
            None => DetectionConfig::default(),
        };
        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Replace every setting that `overrides` specifies.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(v) = overrides.window_size {
            self.window_size = v;
        }
        if let Some(v) = overrides.min_drop_percent {
            self.min_drop_percent = v;
        }
        if let Some(v) = overrides.min_abs_drop {
            self.min_abs_drop = Some(v);
        }
        if let Some(v) = overrides.max_peaks {
            self.max_peaks = v;
        }
        if let Some(v) = overrides.proximity_threshold {
            self.proximity_threshold = v;
        }
        self
    }

    /// Read a (possibly partial) configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DetectionConfig =
            serde_json::from_str(&text).context("parsing detection config")?;
        Ok(config)
    }

    /// Reject values that cannot produce a meaningful run.
    pub fn validate(&self) -> DetectResult<()> {
        if self.window_size <= 0 {
            return Err(DetectError::InvalidConfiguration(format!(
                "window_size must be positive, got {}",
                self.window_size
            )));
        }
        if !self.min_drop_percent.is_finite() {
            return Err(DetectError::InvalidConfiguration(format!(
                "min_drop_percent must be finite, got {}",
                self.min_drop_percent
            )));
        }
        if let Some(abs) = self.min_abs_drop {
            if !abs.is_finite() {
                return Err(DetectError::InvalidConfiguration(format!(
                    "min_abs_drop must be finite, got {abs}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = DetectionConfig::default();
        assert_eq!(c.window_size, 15);
        assert_eq!(c.min_drop_percent, 1.0);
        assert_eq!(c.min_abs_drop, None);
        assert_eq!(c.max_peaks, 15);
        assert_eq!(c.proximity_threshold, 5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c: DetectionConfig =
            serde_json::from_str(r#"{ "window_size": 25, "min_abs_drop": 0.01 }"#).unwrap();
        assert_eq!(c.window_size, 25);
        assert_eq!(c.min_abs_drop, Some(0.01));
        assert_eq!(c.max_peaks, 15);
    }

    #[test]
    fn non_positive_window_is_rejected() {
        for w in [0, -4] {
            let c = DetectionConfig {
                window_size: w,
                ..DetectionConfig::default()
            };
            assert!(matches!(
                c.validate(),
                Err(DetectError::InvalidConfiguration(_))
            ));
        }
    }

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("rusty-dips-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn flags_override_file_values() {
        let path = temp_config(
            "override.json",
            r#"{ "window_size": 25, "min_drop_percent": 4.0, "min_abs_drop": 0.01, "max_peaks": 21 }"#,
        );
        let overrides = ConfigOverrides {
            window_size: Some(9),
            max_peaks: Some(3),
            ..ConfigOverrides::default()
        };
        let c = DetectionConfig::resolve(Some(&path), &overrides);
        std::fs::remove_file(&path).ok();
        let c = c.unwrap();

        assert_eq!(c.window_size, 9);
        assert_eq!(c.max_peaks, 3);
        assert_eq!(c.min_drop_percent, 4.0);
        assert_eq!(c.min_abs_drop, Some(0.01));
        assert_eq!(c.proximity_threshold, 5);
    }

    #[test]
    fn absent_abs_drop_flag_keeps_file_value() {
        let path = temp_config("abs.json", r#"{ "min_abs_drop": 0.25 }"#);
        let kept = DetectionConfig::resolve(Some(&path), &ConfigOverrides::default());
        let replaced = DetectionConfig::resolve(
            Some(&path),
            &ConfigOverrides {
                min_abs_drop: Some(0.5),
                ..ConfigOverrides::default()
            },
        );
        std::fs::remove_file(&path).ok();
        assert_eq!(kept.unwrap().min_abs_drop, Some(0.25));
        assert_eq!(replaced.unwrap().min_abs_drop, Some(0.5));
    }

    #[test]
    fn merged_config_is_validated() {
        let path = temp_config("invalid.json", r#"{ "window_size": 25 }"#);
        let result = DetectionConfig::resolve(
            Some(&path),
            &ConfigOverrides {
                window_size: Some(0),
                ..ConfigOverrides::default()
            },
        );
        std::fs::remove_file(&path).ok();
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DetectError>(),
            Some(DetectError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn no_file_starts_from_defaults() {
        let c = DetectionConfig::resolve(
            None,
            &ConfigOverrides {
                proximity_threshold: Some(-1),
                ..ConfigOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(c.proximity_threshold, -1);
        assert_eq!(c.window_size, 15);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("rusty-dips-does-not-exist.json");
        assert!(DetectionConfig::resolve(Some(&path), &ConfigOverrides::default()).is_err());
    }

    #[test]
    fn nan_thresholds_are_rejected() {
        let c = DetectionConfig {
            min_abs_drop: Some(f64::NAN),
            ..DetectionConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
