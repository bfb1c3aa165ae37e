//! The cleaning filters, each a pure series-to-series transform.

use crate::core::{QualityFlag, VegetationSeries};
use crate::transform::rolling_mean;
use crate::utils::{mean, quantile};

/// A cleaning filter. Filters compose into an ordered pipeline; each one
/// consumes an immutable series and produces a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Repair non-good observations by neighbor interpolation.
    CloudMask,
    /// Repair IQR outliers by neighbor interpolation.
    OutlierRemoval,
    /// Attach a centered moving-average channel.
    TemporalSmoothing,
}

impl Filter {
    /// Parse a filter name. Unknown names yield `None`; pipelines built
    /// from names skip them with a warning.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cloud_mask" => Some(Filter::CloudMask),
            "outlier_removal" => Some(Filter::OutlierRemoval),
            "temporal_smoothing" => Some(Filter::TemporalSmoothing),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::CloudMask => "cloud_mask",
            Filter::OutlierRemoval => "outlier_removal",
            Filter::TemporalSmoothing => "temporal_smoothing",
        }
    }

    /// The standard pipeline, in application order.
    pub fn default_pipeline() -> Vec<Filter> {
        vec![
            Filter::CloudMask,
            Filter::OutlierRemoval,
            Filter::TemporalSmoothing,
        ]
    }

    /// Apply this filter to a series, yielding a new series.
    pub fn apply(&self, series: &VegetationSeries) -> VegetationSeries {
        match self {
            Filter::CloudMask => cloud_mask(series),
            Filter::OutlierRemoval => remove_outliers(series),
            Filter::TemporalSmoothing => temporal_smoothing(series),
        }
    }
}

/// Repair every non-`Good` observation by interpolating between its nearest
/// good neighbors, reflagging the repaired points as `Interpolated`.
fn cloud_mask(series: &VegetationSeries) -> VegetationSeries {
    let good: Vec<bool> = series
        .flags()
        .iter()
        .map(|&f| f == QualityFlag::Good)
        .collect();

    if good.iter().all(|&g| g) {
        return series.clone();
    }

    let repaired = interpolate_masked(series.values(), &good);
    let flags: Vec<QualityFlag> = good
        .iter()
        .map(|&g| {
            if g {
                QualityFlag::Good
            } else {
                QualityFlag::Interpolated
            }
        })
        .collect();

    series.with_repaired(repaired, flags)
}

/// Repair statistical outliers outside `[Q25 - 1.5*IQR, Q75 + 1.5*IQR]`,
/// reflagging them as `OutlierCorrected`.
fn remove_outliers(series: &VegetationSeries) -> VegetationSeries {
    let values = series.values();
    if values.is_empty() {
        return series.clone();
    }

    let q25 = quantile(values, 0.25);
    let q75 = quantile(values, 0.75);
    let iqr = q75 - q25;
    let lower = q25 - 1.5 * iqr;
    let upper = q75 + 1.5 * iqr;

    let in_bounds: Vec<bool> = values.iter().map(|&v| v >= lower && v <= upper).collect();
    if in_bounds.iter().all(|&ok| ok) {
        return series.clone();
    }

    let corrected = in_bounds.iter().filter(|&&ok| !ok).count();
    tracing::debug!(corrected, "corrected statistical outliers");

    let repaired = interpolate_masked(values, &in_bounds);
    let flags: Vec<QualityFlag> = series
        .flags()
        .iter()
        .zip(in_bounds.iter())
        .map(|(&flag, &ok)| {
            if ok {
                flag
            } else {
                QualityFlag::OutlierCorrected
            }
        })
        .collect();

    series.with_repaired(repaired, flags)
}

/// Attach a centered moving-average channel; raw values are retained.
fn temporal_smoothing(series: &VegetationSeries) -> VegetationSeries {
    let n = series.len();
    let window = (n / 2).min(5);
    if window < 3 {
        return series.clone();
    }

    let smoothed = rolling_mean(series.values(), window, true, 1);
    series.with_smoothed(smoothed)
}

/// Repair the values where `valid[i]` is false.
///
/// Linear interpolation by index between the nearest valid neighbor on each
/// side; one-sided neighbors are copied; isolated gaps take the mean of all
/// valid values. With no valid points at all, values pass through unchanged.
pub(crate) fn interpolate_masked(values: &[f64], valid: &[bool]) -> Vec<f64> {
    let mut result = values.to_vec();

    let valid_indices: Vec<usize> = valid
        .iter()
        .enumerate()
        .filter(|(_, &v)| v)
        .map(|(i, _)| i)
        .collect();

    if valid_indices.is_empty() {
        return result;
    }

    let valid_values: Vec<f64> = valid_indices.iter().map(|&i| values[i]).collect();
    let fallback = mean(&valid_values);

    if valid_indices.len() < 2 {
        for (i, &ok) in valid.iter().enumerate() {
            if !ok {
                result[i] = fallback;
            }
        }
        return result;
    }

    for (i, &ok) in valid.iter().enumerate() {
        if ok {
            continue;
        }
        let left = valid_indices.iter().rev().find(|&&v| v < i).copied();
        let right = valid_indices.iter().find(|&&v| v > i).copied();

        result[i] = match (left, right) {
            (Some(l), Some(r)) => {
                let weight = (i - l) as f64 / (r - l) as f64;
                values[l] * (1.0 - weight) + values[r] * weight
            }
            (Some(l), None) => values[l],
            (None, Some(r)) => values[r],
            (None, None) => fallback,
        };
    }

    result
}
