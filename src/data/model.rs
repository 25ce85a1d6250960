use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// MetadataValue – a single metadata cell attached to a spectrum
// ---------------------------------------------------------------------------

/// A dynamically-typed metadata value (sample name, exposure, operator…).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl MetadataValue {
    /// Interpret free text the way a spreadsheet would: empty → null, then
    /// integer, float, bool, and finally plain string.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return MetadataValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return MetadataValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return MetadataValue::Float(f);
        }
        if s == "true" || s == "false" {
            return MetadataValue::Bool(s == "true");
        }
        MetadataValue::String(s.to_string())
    }

    /// Loose equality used by metadata filters: `1` matches `1.0`.
    pub fn matches(&self, other: &MetadataValue) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v:.4}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Spectrum – one intensity trace
// ---------------------------------------------------------------------------

/// A single spectrum: wavelengths in ascending order and their intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Wavelength axis (x).
    pub x: Vec<f64>,
    /// Intensity axis (y) – same length as `x`.
    pub y: Vec<f64>,
    /// Metadata columns: column_name → value.
    pub metadata: BTreeMap<String, MetadataValue>,
}

/// Metadata keys tried, in order, when naming a spectrum in a report.
const LABEL_KEYS: [&str; 3] = ["name", "sample", "source"];

impl Spectrum {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Spectrum {
            x,
            y,
            metadata: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Human-readable name for reports, falling back to the row position.
    pub fn label(&self, position: usize) -> String {
        LABEL_KEYS
            .iter()
            .find_map(|k| self.metadata.get(*k))
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("spectrum {position}"))
    }
}

// ---------------------------------------------------------------------------
// SpectralDataset – everything read from one file
// ---------------------------------------------------------------------------

/// All spectra read from one file plus the metadata columns seen.
#[derive(Debug, Clone)]
pub struct SpectralDataset {
    pub spectra: Vec<Spectrum>,
    /// Sorted metadata column names across all spectra (excludes x, y).
    pub column_names: Vec<String>,
}

impl SpectralDataset {
    pub fn from_spectra(spectra: Vec<Spectrum>) -> Self {
        let mut column_names: Vec<String> = spectra
            .iter()
            .flat_map(|sp| sp.metadata.keys().cloned())
            .collect();
        column_names.sort();
        column_names.dedup();
        SpectralDataset {
            spectra,
            column_names,
        }
    }

    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }
}
