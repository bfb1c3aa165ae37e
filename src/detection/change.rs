//! Change-point detection of flowering onsets.
//!
//! Looks for anomalously steep rises in the smoothed first differences and
//! tracks each rise forward to a peak and a decline, closing the candidate
//! interval without the generic run grouping.

use super::grouping::EventSpan;
use crate::core::DetectionConfig;
use crate::transform::rolling_mean;
use crate::utils::population_std;
use chrono::NaiveDate;

/// Steps tracked forward from an onset while searching for the peak.
const PEAK_SEARCH_STEPS: usize = 10;
/// Steps tracked past the peak while searching for the decline.
const END_SEARCH_STEPS: usize = 15;
/// A drop below this fraction of the running peak ends the peak search.
const PEAK_DROP_RATIO: f64 = 0.8;
/// The event closes at the first value below this fraction of the peak.
const END_DROP_RATIO: f64 = 0.7;

/// Detect candidate events from significant rises in the series.
pub(crate) fn detect(
    dates: &[NaiveDate],
    values: &[f64],
    config: &DetectionConfig,
) -> Vec<EventSpan> {
    if values.len() < 5 {
        return Vec::new();
    }

    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();

    // Full windows only: partial edge windows would dilute the threshold.
    let smoothed = rolling_mean(&diffs, config.smoothing_window, true, config.smoothing_window);
    let finite: Vec<f64> = smoothed.iter().copied().filter(|d| d.is_finite()).collect();
    if finite.is_empty() {
        return Vec::new();
    }

    let threshold = 1.5 * population_std(&finite);

    let mask: Vec<bool> = smoothed
        .iter()
        .map(|&d| d.is_finite() && d > threshold)
        .collect();

    let mut spans = Vec::new();
    for (i, &exceeds) in mask.iter().enumerate() {
        let is_onset = exceeds && (i == 0 || !mask[i - 1]);
        if !is_onset {
            continue;
        }
        // diffs[i] is the rise from values[i] to values[i + 1]; the event
        // opens at the point where the rise is realized.
        if let Some(span) = track_event(dates, values, i + 1, config) {
            spans.push(span);
        }
    }

    spans
}

/// Follow an opened event forward to its peak and decline.
fn track_event(
    dates: &[NaiveDate],
    values: &[f64],
    start: usize,
    config: &DetectionConfig,
) -> Option<EventSpan> {
    if start >= values.len().saturating_sub(1) {
        return None;
    }

    let mut peak = start;
    let mut peak_value = values[start];
    for i in start + 1..values.len().min(start + PEAK_SEARCH_STEPS) {
        if values[i] > peak_value {
            peak_value = values[i];
            peak = i;
        } else if values[i] < peak_value * PEAK_DROP_RATIO {
            break;
        }
    }

    let mut end = peak;
    for i in peak + 1..values.len().min(peak + END_SEARCH_STEPS) {
        end = i;
        if values[i] < peak_value * END_DROP_RATIO {
            break;
        }
    }

    let duration = (dates[end] - dates[start]).num_days();
    if duration < config.min_duration_days || duration > config.max_duration_days {
        return None;
    }

    Some(EventSpan { start, peak, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates_16d(n: usize) -> Vec<NaiveDate> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| base + chrono::Duration::days(16 * i as i64))
            .collect()
    }

    #[test]
    fn sharp_rise_surfaces_an_event_peaking_at_fourth_point() {
        let dates = dates_16d(5);
        let values = vec![0.30, 0.35, 0.40, 0.55, 0.45];

        let spans = detect(&dates, &values, &DetectionConfig::default());

        assert!(!spans.is_empty());
        assert!(spans.iter().any(|s| s.peak == 3));
        for span in &spans {
            let duration = (dates[span.end] - dates[span.start]).num_days();
            assert!((5..=45).contains(&duration));
        }
    }

    #[test]
    fn flat_series_has_no_events() {
        let dates = dates_16d(10);
        let values = vec![0.4; 10];
        assert!(detect(&dates, &values, &DetectionConfig::default()).is_empty());
    }

    #[test]
    fn short_series_has_no_events() {
        let dates = dates_16d(4);
        let values = vec![0.3, 0.4, 0.5, 0.4];
        assert!(detect(&dates, &values, &DetectionConfig::default()).is_empty());
    }

    #[test]
    fn monotone_decline_has_no_events() {
        let dates = dates_16d(8);
        let values: Vec<f64> = (0..8).map(|i| 0.8 - 0.05 * i as f64).collect();
        assert!(detect(&dates, &values, &DetectionConfig::default()).is_empty());
    }

    #[test]
    fn peak_search_stops_on_steep_drop() {
        // Rise to a peak, collapse, then a late higher value that must not
        // be claimed by the same event.
        let dates = dates_16d(12);
        let values = vec![
            0.30, 0.30, 0.30, 0.30, 0.60, 0.55, 0.20, 0.20, 0.20, 0.20, 0.90, 0.90,
        ];
        let spans = detect(&dates, &values, &DetectionConfig::default());
        for span in &spans {
            assert!(span.end >= span.peak);
            assert!(span.peak >= span.start);
        }
    }
}
