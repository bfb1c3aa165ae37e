//! Post-cleaning quality metrics.

use crate::core::{QualityFlag, VegetationSeries};
use crate::transform::rolling_mean;
use crate::utils::{mean, population_std};
use serde::Serialize;

/// Quality summary of a cleaned series.
#[derive(Debug, Clone, Serialize)]
pub struct QualityMetrics {
    /// Share of observations still flagged `good`, in [0, 1].
    pub completeness: f64,
    /// Regularity of consecutive differences, in [0, 1].
    pub temporal_consistency: f64,
    /// Trend-to-residual power ratio, clipped to [0.1, 100].
    pub signal_to_noise: f64,
    pub total_observations: usize,
    pub good_count: usize,
    pub interpolated_count: usize,
    pub outlier_corrected_count: usize,
}

impl QualityMetrics {
    /// Compute metrics for a (cleaned) series.
    pub fn compute(series: &VegetationSeries) -> Self {
        let flags = series.flags();
        let total = flags.len();
        let good_count = series.good_count();
        let interpolated_count = flags
            .iter()
            .filter(|&&f| f == QualityFlag::Interpolated)
            .count();
        let outlier_corrected_count = flags
            .iter()
            .filter(|&&f| f == QualityFlag::OutlierCorrected)
            .count();

        let completeness = if total == 0 {
            1.0
        } else {
            good_count as f64 / total as f64
        };

        Self {
            completeness,
            temporal_consistency: temporal_consistency(series.values()),
            signal_to_noise: signal_to_noise(series.values()),
            total_observations: total,
            good_count,
            interpolated_count,
            outlier_corrected_count,
        }
    }
}

/// Stability of step-to-step changes: 1 - std(diffs) / mean(|diffs|).
fn temporal_consistency(values: &[f64]) -> f64 {
    if values.len() < 3 {
        return 1.0;
    }

    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let mean_abs = mean(&diffs.iter().map(|d| d.abs()).collect::<Vec<_>>());

    if mean_abs > 0.0 {
        (1.0 - population_std(&diffs) / mean_abs).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Ratio of trend power to residual power around a 5-point moving average.
fn signal_to_noise(values: &[f64]) -> f64 {
    if values.len() < 3 {
        return 1.0;
    }

    let snr = if values.len() >= 5 {
        let signal = rolling_mean(values, 5, true, 1);
        let residuals: Vec<f64> = values
            .iter()
            .zip(signal.iter())
            .map(|(v, s)| v - s)
            .collect();
        let noise = population_std(&residuals);
        if noise > 0.0 {
            population_std(&signal) / noise
        } else {
            f64::INFINITY
        }
    } else {
        let std = population_std(values);
        if std > 0.0 {
            mean(values) / std
        } else {
            1.0
        }
    };

    snr.clamp(0.1, 100.0)
}
