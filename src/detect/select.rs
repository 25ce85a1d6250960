use super::score::ScoredPeak;

/// Take the `max_peaks` best peaks from an already ranked list.
///
/// **A zero or negative `max_peaks` returns nothing.** It is the switch for
/// suppressing peak markers, not a request for an unlimited list.
pub fn select_top(peaks: &[ScoredPeak], max_peaks: i64) -> Vec<ScoredPeak> {
    if max_peaks <= 0 {
        return Vec::new();
    }
    let take = usize::try_from(max_peaks).unwrap_or(usize::MAX);
    peaks.iter().take(take).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::minima::CandidateMinimum;

    fn ranked(n: usize) -> Vec<ScoredPeak> {
        (0..n)
            .map(|i| ScoredPeak {
                candidate: CandidateMinimum {
                    index: i,
                    wavelength: i as f64,
                    intensity: 0.0,
                    background: 1.0,
                    abs_drop: 1.0,
                    drop_percent: 100.0,
                },
                hybrid_score: 1.0 - i as f64 / 10.0,
            })
            .collect()
    }

    #[test]
    fn non_positive_limit_suppresses_everything() {
        let peaks = ranked(5);
        assert!(select_top(&peaks, 0).is_empty());
        assert!(select_top(&peaks, -3).is_empty());
    }

    #[test]
    fn large_limit_returns_all() {
        assert_eq!(select_top(&ranked(5), 1000).len(), 5);
    }

    #[test]
    fn keeps_the_head_of_the_ranking() {
        let top = select_top(&ranked(5), 2);
        assert_eq!(top.iter().map(|p| p.index()).collect::<Vec<_>>(), vec![0, 1]);
    }
}
