use super::score::{rank_by_score, ScoredPeak};

/// Collapse peaks that sit within `proximity_threshold` samples of each other.
///
/// Peaks are swept once in ascending index order. Each one is compared with
/// the last peak *kept* so far: if the index gap is at most the threshold the
/// higher score wins (a tie keeps the earlier peak), otherwise it is kept as a
/// new entry. The result is ranked by descending score.
///
/// The sweep is greedy and does not search for the best non-overlapping set.
/// A non-positive threshold, or an empty input, returns `peaks` untouched.
pub fn deduplicate(mut peaks: Vec<ScoredPeak>, proximity_threshold: i64) -> Vec<ScoredPeak> {
    if proximity_threshold <= 0 || peaks.is_empty() {
        return peaks;
    }
    let threshold = usize::try_from(proximity_threshold).unwrap_or(usize::MAX);

    peaks.sort_by_key(|p| p.index());

    let mut kept: Vec<ScoredPeak> = Vec::with_capacity(peaks.len());
    for peak in peaks {
        if let Some(last) = kept.last_mut() {
            if peak.index() - last.index() <= threshold {
                if peak.hybrid_score > last.hybrid_score {
                    *last = peak;
                }
                continue;
            }
        }
        kept.push(peak);
    }

    rank_by_score(&mut kept);
    kept
}
