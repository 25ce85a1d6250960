use super::minima::CandidateMinimum;

/// Keep candidates deep enough to count as absorption.
///
/// A candidate passes when `drop_percent >= min_drop_percent` and, if
/// `min_abs_drop` is given, also `abs_drop >= min_abs_drop`. Order is kept.
pub fn filter_candidates(
    candidates: &[CandidateMinimum],
    min_drop_percent: f64,
    min_abs_drop: Option<f64>,
) -> Vec<CandidateMinimum> {
    candidates
        .iter()
        .filter(|c| {
            c.drop_percent >= min_drop_percent
                && min_abs_drop.map_or(true, |min_abs| c.abs_drop >= min_abs)
        })
        .copied()
        .collect()
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
    fn percent_only_when_abs_is_absent() {
        let cs = [candidate(1, 0.001, 5.0), candidate(2, 10.0, 0.5)];
        let kept = filter_candidates(&cs, 1.0, None);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].index, 1);
    }

    #[test]
    fn both_criteria_must_hold() {
        let cs = [
            candidate(1, 0.001, 5.0),
            candidate(2, 10.0, 0.5),
            candidate(3, 0.2, 4.0),
        ];
        let kept = filter_candidates(&cs, 1.0, Some(0.1));
        assert_eq!(kept.iter().map(|c| c.index).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let cs = [candidate(4, 0.5, 2.0)];
        assert_eq!(filter_candidates(&cs, 2.0, Some(0.5)).len(), 1);
    }

    #[test]
    fn raising_the_percent_never_adds_candidates() {
        let cs: Vec<_> = (0..20)
            .map(|i| candidate(i, i as f64 * 0.1, i as f64 * 1.5))
            .collect();
        let mut last = usize::MAX;
        for t in 0..40 {
            let n = filter_candidates(&cs, t as f64, None).len();
            assert!(n <= last);
            last = n;
        }
    }
}
