//! Detection core: finds absorption dips in one intensity trace.
//!
//! Architecture:
//! ```text
//!  (wavelength[], intensity[])
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ background │  centred moving average → background[]
//!   └────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  minima   │  strict local minima + drop below background
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ threshold │  drop_percent AND optional abs_drop
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  score    │  hybrid_score from the filtered set's maxima
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  dedup    │  greedy proximity merge
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  select   │  top max_peaks
//!   └──────────┘
//! ```
//!
//! Every stage is a pure function; nothing here prints or keeps state.

pub mod background;
pub mod config;
pub mod dedup;
pub mod error;
pub mod minima;
pub mod pipeline;
pub mod score;
pub mod select;
pub mod threshold;

pub use background::estimate_background;
pub use config::{ConfigOverrides, DetectionConfig};
pub use dedup::deduplicate;
pub use error::{DetectError, DetectResult};
pub use minima::{find_local_minima, CandidateMinimum, Minima};
pub use pipeline::{find_absorption_peaks, Detection};
pub use score::{rank_by_score, score, ScoredPeak};
pub use select::select_top;
pub use threshold::filter_candidates;
