//! Event detector entry point: strategy dispatch and event enrichment.

use super::grouping::{confidence_score, group_exceedances, EventSpan};
use super::{change, cluster, seasonal, threshold};
use crate::core::{
    ConfidenceLevel, DetectionConfig, EventType, FloweringEvent, VegetationSeries,
};
use crate::error::{AnalysisError, Result};
use crate::utils::mean;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Detection strategy. Adding a strategy means adding a variant, not a new
/// conditional branch at the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Exceedance over a rolling baseline by a fixed increment.
    Threshold,
    /// Onset tracking over smoothed first differences.
    #[default]
    ChangeDetection,
    /// Z-score anomalies against a day-of-year baseline.
    SeasonalAnomaly,
    /// Membership in the highest-valued k-means cluster.
    Clustering,
}

impl Algorithm {
    /// Parse a wire algorithm name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "threshold" => Some(Algorithm::Threshold),
            "change_detection" => Some(Algorithm::ChangeDetection),
            "seasonal_anomaly" => Some(Algorithm::SeasonalAnomaly),
            "clustering" => Some(Algorithm::Clustering),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Threshold => "threshold",
            Algorithm::ChangeDetection => "change_detection",
            Algorithm::SeasonalAnomaly => "seasonal_anomaly",
            Algorithm::Clustering => "clustering",
        }
    }
}

/// Detects flowering events in a cleaned vegetation-index series.
#[derive(Debug, Clone, Default)]
pub struct EventDetector {
    config: DetectionConfig,
}

impl EventDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect events with the given strategy.
    ///
    /// Fail-soft: validation and data-sufficiency failures are logged and
    /// collapse to an empty list, never an error to the caller.
    pub fn detect(&self, series: &VegetationSeries, algorithm: Algorithm) -> Vec<FloweringEvent> {
        match self.try_detect(series, algorithm) {
            Ok(events) => {
                info!(
                    algorithm = algorithm.name(),
                    count = events.len(),
                    "detected flowering events"
                );
                events
            }
            Err(err) => {
                warn!(algorithm = algorithm.name(), error = %err, "detection skipped");
                Vec::new()
            }
        }
    }

    /// Detect events by wire strategy name; unknown names fall back to
    /// change detection with a warning.
    pub fn detect_named(&self, series: &VegetationSeries, name: &str) -> Vec<FloweringEvent> {
        let algorithm = Algorithm::from_name(name).unwrap_or_else(|| {
            warn!(
                algorithm = name,
                "unknown algorithm, falling back to change_detection"
            );
            Algorithm::ChangeDetection
        });
        self.detect(series, algorithm)
    }

    /// Detection with invalid input kept distinguishable from an
    /// unremarkable series (which yields `Ok` with no events).
    pub fn try_detect(
        &self,
        series: &VegetationSeries,
        algorithm: Algorithm,
    ) -> Result<Vec<FloweringEvent>> {
        let good = series.good_indices();
        if good.len() < 3 {
            return Err(AnalysisError::InsufficientData {
                needed: 3,
                got: good.len(),
            });
        }

        let dates: Vec<NaiveDate> = good.iter().map(|&i| series.dates()[i]).collect();
        let values: Vec<f64> = good.iter().map(|&i| series.values()[i]).collect();
        let days_of_year: Vec<u32> = good.iter().map(|&i| series.day_of_year(i)).collect();

        let spans = self.spans_for(algorithm, &dates, &values, &days_of_year);

        Ok(spans
            .into_iter()
            .map(|span| self.enrich(series, &dates, &values, span))
            .collect())
    }

    fn spans_for(
        &self,
        algorithm: Algorithm,
        dates: &[NaiveDate],
        values: &[f64],
        days_of_year: &[u32],
    ) -> Vec<EventSpan> {
        match algorithm {
            Algorithm::Threshold => {
                let mask = threshold::exceedance_mask(values, &self.config);
                group_exceedances(dates, values, &mask, &self.config)
            }
            Algorithm::ChangeDetection => change::detect(dates, values, &self.config),
            Algorithm::SeasonalAnomaly => {
                let mask = seasonal::anomaly_mask(days_of_year, values, &self.config);
                group_exceedances(dates, values, &mask, &self.config)
            }
            Algorithm::Clustering => {
                match cluster::flowering_mask(days_of_year, values, &self.config) {
                    Some(mask) => group_exceedances(dates, values, &mask, &self.config),
                    None => {
                        warn!("clustering degenerate, falling back to change_detection");
                        change::detect(dates, values, &self.config)
                    }
                }
            }
        }
    }

    /// Turn a candidate span into a full event with confidence,
    /// classification, and passthrough metadata.
    fn enrich(
        &self,
        series: &VegetationSeries,
        dates: &[NaiveDate],
        values: &[f64],
        span: EventSpan,
    ) -> FloweringEvent {
        let start_date = dates[span.start];
        let peak_date = dates[span.peak];
        let end_date = dates[span.end];
        let duration_days = (end_date - start_date).num_days();

        let peak_value = values[span.peak];
        let intensity = peak_value - mean(values);
        let confidence = confidence_score(&values[span.start..=span.end], values);
        let confidence_level = ConfidenceLevel::from_confidence(confidence);
        let event_type = EventType::classify(duration_days, intensity);

        let location = series.location();
        let description = format!(
            "{} detected at {:.2}°, {:.2}° from {} to {} (confidence: {})",
            event_type.label(),
            location.latitude,
            location.longitude,
            start_date,
            end_date,
            confidence_level.label(),
        );

        FloweringEvent {
            start_date,
            peak_date,
            end_date,
            duration_days,
            peak_value,
            intensity,
            confidence,
            confidence_level,
            event_type,
            description,
            location,
            data_source: series.source().clone(),
        }
    }
}
