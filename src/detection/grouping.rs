//! Run grouping and confidence scoring shared by the detection strategies.

use crate::core::DetectionConfig;
use crate::utils::{mean, population_std};
use chrono::NaiveDate;

/// Candidate event as inclusive indices into the good-quality arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EventSpan {
    pub start: usize,
    pub peak: usize,
    pub end: usize,
}

/// Group consecutive exceedance-mask runs into candidate events.
///
/// Runs shorter than two points are discarded; surviving runs keep their
/// first/last index and the in-run value maximum as peak, then are filtered
/// by the admissible duration range.
pub(crate) fn group_exceedances(
    dates: &[NaiveDate],
    values: &[f64],
    mask: &[bool],
    config: &DetectionConfig,
) -> Vec<EventSpan> {
    let mut spans = Vec::new();
    let mut run_start: Option<usize> = None;

    for i in 0..=mask.len() {
        let exceeds = i < mask.len() && mask[i];
        match (run_start, exceeds) {
            (None, true) => run_start = Some(i),
            (Some(start), false) => {
                let end = i - 1;
                if end - start + 1 >= 2 {
                    if let Some(span) = make_span(dates, values, start, end, config) {
                        spans.push(span);
                    }
                }
                run_start = None;
            }
            _ => {}
        }
    }

    spans
}

fn make_span(
    dates: &[NaiveDate],
    values: &[f64],
    start: usize,
    end: usize,
    config: &DetectionConfig,
) -> Option<EventSpan> {
    let peak = (start..=end)
        .max_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(start);

    let duration = (dates[end] - dates[start]).num_days();
    if duration < config.min_duration_days || duration > config.max_duration_days {
        return None;
    }

    Some(EventSpan { start, peak, end })
}

/// Weighted confidence score for a candidate event, clamped to [0, 1].
///
/// Four factors compare the run against the whole series: peak intensity
/// over the global spread, run length against an expected 5-point event,
/// in-run consistency, and mean contrast over the global mean. Degenerate
/// statistics (zero spread, non-positive means) zero out their factor
/// instead of producing NaN.
pub(crate) fn confidence_score(event_values: &[f64], all_values: &[f64]) -> f64 {
    if event_values.is_empty() || all_values.is_empty() {
        return 0.0;
    }

    let all_mean = mean(all_values);
    let all_std = population_std(all_values);
    let event_mean = mean(event_values);
    let event_std = population_std(event_values);
    let event_max = event_values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    let intensity = if all_std > 0.0 {
        ((event_max - all_mean) / all_std).min(1.0)
    } else {
        0.0
    };
    let duration = (event_values.len() as f64 / 5.0).min(1.0);
    let consistency = if event_mean > 0.0 {
        1.0 - event_std / event_mean
    } else {
        0.0
    };
    let contrast = if all_mean != 0.0 {
        (event_mean / all_mean - 1.0).min(1.0)
    } else {
        0.0
    };

    let confidence =
        0.4 * intensity + 0.2 * duration + 0.2 * consistency + 0.2 * contrast;
    confidence.clamp(0.0, 1.0)
}
