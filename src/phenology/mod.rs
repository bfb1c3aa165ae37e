//! Seasonal phenology metrics extracted from a vegetation-index series.

use crate::core::VegetationSeries;
use crate::error::{AnalysisError, Result};
use crate::utils::trapezoid;
use chrono::NaiveDate;
use serde::Serialize;

/// Fraction of the seasonal amplitude that marks the start of season.
const SOS_AMPLITUDE_FRACTION: f64 = 0.2;
/// Fraction of the peak below which the season is considered over.
const EOS_PEAK_FRACTION: f64 = 0.5;
/// Points needed before a start-of-season crossing is meaningful.
const MIN_POINTS_FOR_SOS: usize = 5;

/// Phenology summary of one growing season.
///
/// Start and end of season are optional: short or truncated series may
/// never cross the respective thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct PhenologyMetrics {
    pub start_of_season: Option<NaiveDate>,
    pub peak_of_season: NaiveDate,
    pub peak_value: f64,
    pub end_of_season: Option<NaiveDate>,
    pub season_length_days: Option<i64>,
    /// Area under the curve, unit index-value times observation step.
    pub integrated_value: f64,
    pub seasonal_amplitude: f64,
}

/// Extract phenology metrics from a series.
///
/// The peak of season is the global maximum. The start of season is the
/// first upward crossing of `min + 0.2 * (max - min)`; the end of season
/// is the first post-peak drop below half the peak value.
pub fn analyze(series: &VegetationSeries) -> Result<PhenologyMetrics> {
    if series.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let values = series.values();
    let dates = series.dates();

    let (peak_index, &peak_value) = values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .ok_or(AnalysisError::EmptyInput)?;

    let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
    let amplitude = peak_value - min_value;

    let start_of_season = find_start_of_season(values, min_value, amplitude, dates);

    let end_of_season = find_end_of_season(values, peak_index, peak_value, dates);

    let season_length_days = match (start_of_season, end_of_season) {
        (Some(start), Some(end)) => Some((end - start).num_days()),
        _ => None,
    };

    Ok(PhenologyMetrics {
        start_of_season,
        peak_of_season: dates[peak_index],
        peak_value,
        end_of_season,
        season_length_days,
        integrated_value: trapezoid(values),
        seasonal_amplitude: amplitude,
    })
}

/// First upward crossing of the green-up threshold.
fn find_start_of_season(
    values: &[f64],
    min_value: f64,
    amplitude: f64,
    dates: &[NaiveDate],
) -> Option<NaiveDate> {
    if values.len() < MIN_POINTS_FOR_SOS || amplitude <= 0.0 {
        return None;
    }

    let threshold = min_value + SOS_AMPLITUDE_FRACTION * amplitude;
    // A crossing at the very last observation is not a season start; the
    // scan stops one pair early.
    for i in 0..values.len() - 2 {
        if values[i] < threshold && values[i + 1] >= threshold {
            return Some(dates[i + 1]);
        }
    }
    None
}

/// First post-peak drop below half the peak; `None` when the peak is the
/// last observation and no decline is observed.
fn find_end_of_season(
    values: &[f64],
    peak_index: usize,
    peak_value: f64,
    dates: &[NaiveDate],
) -> Option<NaiveDate> {
    if peak_index + 1 >= values.len() {
        return None;
    }

    for i in peak_index + 1..values.len() {
        if values[i] <= EOS_PEAK_FRACTION * peak_value {
            return Some(dates[i]);
        }
    }
    Some(dates[values.len() - 1])
}
