use serde::Serialize;

// ---------------------------------------------------------------------------
// CandidateMinimum – a strict local minimum measured against the background
// ---------------------------------------------------------------------------

/// A sample lower than both neighbours, with its depth below the background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateMinimum {
    pub index: usize,
    pub wavelength: f64,
    pub intensity: f64,
    pub background: f64,
    /// `background - intensity`.
    pub abs_drop: f64,
    /// `abs_drop` as a percentage of `background`.
    pub drop_percent: f64,
}

/// Output of [`find_local_minima`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Minima {
    /// Candidates in ascending index order.
    pub candidates: Vec<CandidateMinimum>,
    /// Strict minima dropped because `drop_percent` is undefined there: the
    /// background is zero, or the ratio came out NaN or infinite.
    pub skipped_undefined_ratio: usize,
}

/// Scan `1..=n-2` for strict local minima and measure each one.
///
/// Plateaus never qualify: a sample equal to either neighbour is not a
/// minimum.
pub fn find_local_minima(wavelength: &[f64], intensity: &[f64], background: &[f64]) -> Minima {
    let n = intensity.len().min(wavelength.len()).min(background.len());
    let mut out = Minima::default();

    for i in 1..n.saturating_sub(1) {
        let y = intensity[i];
        if !(y < intensity[i - 1] && y < intensity[i + 1]) {
            continue;
        }

        let bg = background[i];
        let abs_drop = bg - y;
        let drop_percent = 100.0 * abs_drop / bg;
        if bg == 0.0 || !drop_percent.is_finite() {
            log::debug!("skipping minimum at index {i}: background {bg} gives no drop ratio");
            out.skipped_undefined_ratio += 1;
            continue;
        }

        out.candidates.push(CandidateMinimum {
            index: i,
            wavelength: wavelength[i],
            intensity: y,
            background: bg,
            abs_drop,
            drop_percent,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn finds_single_dip() {
        let y = [5.0, 4.0, 1.0, 4.0, 5.0];
        let bg = [5.0; 5];
        let m = find_local_minima(&axis(5), &y, &bg);
        assert_eq!(m.candidates.len(), 1);
        let c = m.candidates[0];
        assert_eq!(c.index, 2);
        assert_eq!(c.wavelength, 2.0);
        assert!((c.abs_drop - 4.0).abs() < 1e-12);
        assert!((c.drop_percent - 80.0).abs() < 1e-12);
    }

    #[test]
    fn plateau_is_not_a_minimum() {
        let y = [5.0, 2.0, 2.0, 5.0, 3.0, 3.0, 3.0, 6.0];
        let bg = [4.0; 8];
        let m = find_local_minima(&axis(8), &y, &bg);
        assert!(m.candidates.is_empty());
    }

    #[test]
    fn endpoints_are_never_candidates() {
        let y = [0.0, 5.0, 5.5, 5.0, 0.0];
        let bg = [3.0; 5];
        assert!(find_local_minima(&axis(5), &y, &bg).candidates.is_empty());
    }

    #[test]
    fn zero_background_is_skipped_and_counted() {
        let y = [1.0, -1.0, 1.0, 0.5, 1.0];
        let bg = [0.0, 0.0, 0.0, 1.0, 1.0];
        let m = find_local_minima(&axis(5), &y, &bg);
        assert_eq!(m.skipped_undefined_ratio, 1);
        assert_eq!(m.candidates.len(), 1);
        assert_eq!(m.candidates[0].index, 3);
    }

    #[test]
    fn non_finite_background_is_counted_with_zero_background() {
        let y = [1.0, 0.0, 1.0, 0.0, 1.0, 0.5, 1.0];
        let bg = [1.0, f64::NAN, 1.0, f64::INFINITY, 1.0, 1.0, 1.0];
        let m = find_local_minima(&axis(7), &y, &bg);
        assert_eq!(m.skipped_undefined_ratio, 2);
        assert_eq!(m.candidates.len(), 1);
        assert_eq!(m.candidates[0].index, 5);
    }

    #[test]
    fn short_traces_have_no_candidates() {
        assert!(find_local_minima(&[], &[], &[]).candidates.is_empty());
        assert!(find_local_minima(&[0.0, 1.0], &[2.0, 1.0], &[1.5, 1.5])
            .candidates
            .is_empty());
    }

    #[test]
    fn output_is_in_index_order() {
        let y = [3.0, 1.0, 3.0, 2.0, 3.0, 0.5, 3.0];
        let bg = [3.0; 7];
        let idx: Vec<usize> = find_local_minima(&axis(7), &y, &bg)
            .candidates
            .iter()
            .map(|c| c.index)
            .collect();
        assert_eq!(idx, vec![1, 3, 5]);
    }
}
