//! Absolute-threshold exceedance over a rolling baseline.

use crate::core::DetectionConfig;
use crate::transform::rolling_mean;
use crate::utils::mean;

/// Mark points whose value exceeds the long-run baseline by more than the
/// configured NDVI increment.
///
/// The baseline is a centered rolling mean with `window = min(n/3, 10)`;
/// when the series is too short for a meaningful window the global mean is
/// used instead.
pub(crate) fn exceedance_mask(values: &[f64], config: &DetectionConfig) -> Vec<bool> {
    let window = (values.len() / 3).min(10);

    if window < 2 {
        let baseline = mean(values);
        return values
            .iter()
            .map(|&v| v - baseline > config.ndvi_threshold)
            .collect();
    }

    let baseline = rolling_mean(values, window, true, 1);
    values
        .iter()
        .zip(baseline.iter())
        .map(|(&v, &b)| b.is_finite() && v - b > config.ndvi_threshold)
        .collect()
}
