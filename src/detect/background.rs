use super::error::{DetectError, DetectResult};

// ---------------------------------------------------------------------------
// Local background: centred, boundary-clamped moving average
// ---------------------------------------------------------------------------

/// Bump an even window to the next odd size so it has a centre sample.
pub fn odd_window(window_size: i64) -> DetectResult<usize> {
    if window_size <= 0 {
        return Err(DetectError::InvalidConfiguration(format!(
            "window_size must be positive, got {window_size}"
        )));
    }
    let w = window_size as usize;
    Ok(if w % 2 == 0 { w + 1 } else { w })
}

/// Moving-average background of `intensity`.
///
/// For sample `i` the window is `[i - half, i + half]` clamped to the ends of
/// the trace, where `half = window / 2` after odd coercion. Windows near the
/// edges are therefore shorter; there is no padding or reflection.
pub fn estimate_background(intensity: &[f64], window_size: i64) -> DetectResult<Vec<f64>> {
    let half = odd_window(window_size)? / 2;
    let n = intensity.len();

    Ok((0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            let window = &intensity[start..end];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect())
}
