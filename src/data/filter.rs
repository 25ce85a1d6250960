use std::str::FromStr;

use anyhow::{bail, Error};

use super::model::{MetadataValue, SpectralDataset, Spectrum};

// ---------------------------------------------------------------------------
// Metadata selection: which spectra of a dataset to analyse
// ---------------------------------------------------------------------------

/// `column=value` predicate on spectrum metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFilter {
    pub column: String,
    pub value: MetadataValue,
}

impl FromStr for MetadataFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((column, value)) = s.split_once('=') else {
            bail!("expected column=value, got '{s}'");
        };
        let column = column.trim();
        if column.is_empty() {
            bail!("empty column name in '{s}'");
        }
        Ok(MetadataFilter {
            column: column.to_string(),
            value: MetadataValue::guess(value.trim()),
        })
    }
}

/// Return indices of spectra that pass all filters.
///
/// A spectrum passes a filter when:
/// * its value for the column matches the filter value, or
/// * it has no such column and the filter value is empty (`column=`).
pub fn filtered_indices(dataset: &SpectralDataset, filters: &[MetadataFilter]) -> Vec<usize> {
    dataset
        .spectra
        .iter()
        .enumerate()
        .filter(|(_, sp)| {
            filters.iter().all(|f| match sp.metadata.get(&f.column) {
                Some(val) => val.matches(&f.value),
                None => f.value == MetadataValue::Null,
            })
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Wavelength window
// ---------------------------------------------------------------------------

/// Inclusive wavelength bounds; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WavelengthRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl WavelengthRange {
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min.map_or(true, |lo| x >= lo) && self.max.map_or(true, |hi| x <= hi)
    }
}

/// Keep only the samples whose wavelength lies inside `range`.
pub fn crop(spectrum: &Spectrum, range: &WavelengthRange) -> Spectrum {
    if range.is_open() {
        return spectrum.clone();
    }
    let (x, y): (Vec<f64>, Vec<f64>) = spectrum
        .x
        .iter()
        .zip(&spectrum.y)
        .filter(|(xi, _)| range.contains(**xi))
        .map(|(&xi, &yi)| (xi, yi))
        .unzip();
    Spectrum {
        x,
        y,
        metadata: spectrum.metadata.clone(),
    }
}
