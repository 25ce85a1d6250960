//! Data layer: spectrum types, loading, and selection.
//!
//! Architecture:
//! ```text
//!  .txt / .parquet / .json / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → SpectralDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────────┐
//!   │ SpectralDataset │  Vec<Spectrum>, column names
//!   └────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  metadata predicates + wavelength window
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
