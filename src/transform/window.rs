//! Rolling window functions.

/// Compute a rolling mean (moving average).
///
/// Positions whose window holds fewer than `min_periods` observations are
/// `NaN`. With `center = true` the window is centered on each index and
/// clamped at the series edges; otherwise it trails.
///
/// # Arguments
/// * `series` - Input time series
/// * `window` - Window size
/// * `center` - If true, center the window on each index
/// * `min_periods` - Minimum observations required to emit a value
pub fn rolling_mean(series: &[f64], window: usize, center: bool, min_periods: usize) -> Vec<f64> {
    if series.is_empty() || window == 0 {
        return vec![f64::NAN; series.len()];
    }

    let n = series.len();
    let min_periods = min_periods.max(1).min(window);
    let mut result = vec![f64::NAN; n];

    for i in 0..n {
        let (start, end) = if center {
            let half = window / 2;
            let start = i.saturating_sub(half);
            let end = (i + window - half).min(n);
            (start, end)
        } else {
            if i + 1 < window && min_periods > i + 1 {
                continue;
            }
            (i.saturating_sub(window - 1), i + 1)
        };

        if end - start >= min_periods {
            let sum: f64 = series[start..end].iter().sum();
            result[i] = sum / (end - start) as f64;
        }
    }

    result
}
