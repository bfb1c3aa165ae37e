//! Seasonal anomaly detection against a day-of-year baseline.

use crate::core::DetectionConfig;
use crate::utils::{mean, sample_std};
use std::collections::HashMap;

/// Minimum points needed to build a usable seasonal baseline.
const MIN_POINTS: usize = 10;

/// Mark points that deviate anomalously from their day-of-year baseline.
///
/// All observations sharing a day-of-year form a group; each point's
/// anomaly is its z-score against the group's mean and sample deviation.
/// Groups with a single observation carry no spread and contribute no
/// anomaly signal.
pub(crate) fn anomaly_mask(
    days_of_year: &[u32],
    values: &[f64],
    config: &DetectionConfig,
) -> Vec<bool> {
    if values.len() < MIN_POINTS {
        return vec![false; values.len()];
    }

    let mut groups: HashMap<u32, Vec<f64>> = HashMap::new();
    for (&doy, &value) in days_of_year.iter().zip(values.iter()) {
        groups.entry(doy).or_default().push(value);
    }

    let stats: HashMap<u32, (f64, f64)> = groups
        .into_iter()
        .map(|(doy, vals)| (doy, (mean(&vals), sample_std(&vals))))
        .collect();

    days_of_year
        .iter()
        .zip(values.iter())
        .map(|(doy, &value)| {
            let (day_mean, day_std) = stats[doy];
            let anomaly = if day_std > 0.0 {
                (value - day_mean) / day_std
            } else {
                0.0
            };
            anomaly > config.anomaly_sigma
        })
        .collect()
}
