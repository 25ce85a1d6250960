use serde::Serialize;

use super::minima::CandidateMinimum;

// ---------------------------------------------------------------------------
// ScoredPeak – a filtered candidate with its hybrid score
// ---------------------------------------------------------------------------

/// A candidate that passed the thresholds, ranked by `hybrid_score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredPeak {
    #[serde(flatten)]
    pub candidate: CandidateMinimum,
    /// Mean of the absolute and relative drop, each normalised by its
    /// maximum over the same filtered set. Only comparable within one run.
    pub hybrid_score: f64,
}

impl ScoredPeak {
    pub fn index(&self) -> usize {
        self.candidate.index
    }
}

/// Score each filtered candidate against the set's own maxima.
///
/// With a positive drop threshold every candidate lies below its background,
/// so both normalised terms and the score fall in `(0, 1]`. Input order is
/// kept; see [`rank_by_score`].
pub fn score(filtered: &[CandidateMinimum]) -> Vec<ScoredPeak> {
    if filtered.is_empty() {
        return Vec::new();
    }

    let max_abs = filtered
        .iter()
        .map(|c| c.abs_drop)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_rel = filtered
        .iter()
        .map(|c| c.drop_percent)
        .fold(f64::NEG_INFINITY, f64::max);

    filtered
        .iter()
        .map(|c| ScoredPeak {
            candidate: *c,
            hybrid_score: (normalise(c.abs_drop, max_abs) + normalise(c.drop_percent, max_rel))
                / 2.0,
        })
        .collect()
}

// A non-positive maximum only happens with negative thresholds.
fn normalise(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

/// Stable sort by descending `hybrid_score`; equal scores keep their order.
pub fn rank_by_score(peaks: &mut [ScoredPeak]) {
    peaks.sort_by(|a, b| b.hybrid_score.total_cmp(&a.hybrid_score));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: usize, abs_drop: f64, drop_percent: f64) -> CandidateMinimum {
        CandidateMinimum {
            index,
            wavelength: index as f64,
            intensity: 1.0,
            background: 1.0 + abs_drop,
            abs_drop,
            drop_percent,
        }
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(score(&[]).is_empty());
    }

    #[test]
    fn single_candidate_scores_one() {
        let s = score(&[candidate(3, 0.2, 7.0)]);
        assert_eq!(s.len(), 1);
        assert!((s[0].hybrid_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scores_blend_both_axes() {
        // a holds the abs maximum, b the relative maximum.
        let s = score(&[candidate(1, 4.0, 10.0), candidate(2, 2.0, 40.0)]);
        assert!((s[0].hybrid_score - (1.0 + 0.25) / 2.0).abs() < 1e-12);
        assert!((s[1].hybrid_score - (0.5 + 1.0) / 2.0).abs() < 1e-12);
        assert_eq!(s[0].index(), 1);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let mut s = score(&[
            candidate(1, 1.0, 10.0),
            candidate(2, 2.0, 20.0),
            candidate(3, 1.0, 10.0),
        ]);
        rank_by_score(&mut s);
        let order: Vec<usize> = s.iter().map(|p| p.index()).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }
}
