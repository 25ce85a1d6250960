//! Absorption-dip detection for spectral intensity traces.
//!
//! [`detect`] holds the pure detection pipeline, [`data`] reads spectra
//! from disk, and [`report`] formats results.

pub mod data;
pub mod detect;
pub mod report;

pub use detect::{find_absorption_peaks, Detection, DetectionConfig, ScoredPeak};
