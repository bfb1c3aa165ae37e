//! Property-based tests for the detection and forecasting invariants.
//!
//! These verify bounds that should hold for any plausible vegetation-index
//! series, using randomly generated histories.

use bloomsense::cleaning::TimeSeriesCleaner;
use bloomsense::core::{DetectionConfig, VegetationSeries};
use bloomsense::detection::{Algorithm, EventDetector};
use bloomsense::forecast::{ForecastConfig, Forecaster};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

const ALL_ALGORITHMS: [Algorithm; 4] = [
    Algorithm::Threshold,
    Algorithm::ChangeDetection,
    Algorithm::SeasonalAnomaly,
    Algorithm::Clustering,
];

fn make_series(values: &[f64]) -> VegetationSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates = (0..values.len())
        .map(|i| base + Duration::days(16 * i as i64))
        .collect();
    VegetationSeries::all_good(dates, values.to_vec(), "NDVI").unwrap()
}

/// NDVI values across the valid range, negatives included, away from the
/// sensor extremes.
fn ndvi_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| prop::collection::vec(-0.95..0.95_f64, len))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn events_stay_ordered_and_bounded(values in ndvi_strategy(10, 60)) {
        let series = make_series(&values);
        let detector = EventDetector::new(DetectionConfig::default());
        let config = DetectionConfig::default();

        for algorithm in ALL_ALGORITHMS {
            for event in detector.detect(&series, algorithm) {
                prop_assert!(event.start_date <= event.peak_date);
                prop_assert!(event.peak_date <= event.end_date);
                prop_assert!(event.duration_days >= config.min_duration_days);
                prop_assert!(event.duration_days <= config.max_duration_days);
                prop_assert!(event.confidence.is_finite());
                prop_assert!((0.0..=1.0).contains(&event.confidence));
            }
        }
    }

    #[test]
    fn event_dates_come_from_the_series(values in ndvi_strategy(10, 60)) {
        let series = make_series(&values);
        let detector = EventDetector::new(DetectionConfig::default());

        for algorithm in ALL_ALGORITHMS {
            for event in detector.detect(&series, algorithm) {
                prop_assert!(series.dates().contains(&event.start_date));
                prop_assert!(series.dates().contains(&event.peak_date));
                prop_assert!(series.dates().contains(&event.end_date));
            }
        }
    }

    #[test]
    fn cleaning_preserves_length_and_order(values in ndvi_strategy(5, 60)) {
        let series = make_series(&values);
        let cleaned = TimeSeriesCleaner::new().clean(&series);

        prop_assert_eq!(cleaned.series.len(), series.len());
        prop_assert_eq!(cleaned.series.dates(), series.dates());
    }

    #[test]
    fn quality_metrics_stay_in_range(values in ndvi_strategy(5, 60)) {
        let series = make_series(&values);
        let cleaned = TimeSeriesCleaner::new().clean(&series);

        prop_assert!((0.0..=1.0).contains(&cleaned.quality.completeness));
        prop_assert!((0.0..=1.0).contains(&cleaned.quality.temporal_consistency));
        prop_assert!(cleaned.quality.signal_to_noise >= 0.1);
        prop_assert!(cleaned.quality.signal_to_noise <= 100.0);
    }

    #[test]
    fn forecast_horizon_and_probability_bounds(
        values in ndvi_strategy(5, 40),
        horizon in 1usize..30,
        seed in 0u64..1000
    ) {
        let series = make_series(&values);
        let forecaster = Forecaster::new(ForecastConfig::default().seed(seed));

        let predictions = forecaster.predict(&series, horizon, "Cistus ladanifer");

        prop_assert_eq!(predictions.len(), horizon);
        let last = *series.dates().last().unwrap();
        for (i, p) in predictions.iter().enumerate() {
            prop_assert_eq!(p.date, last + Duration::days(i as i64 + 1));
            prop_assert!((0.0..=1.0).contains(&p.flowering_probability));
            prop_assert!(p.predicted_value.is_finite());
        }
    }

    #[test]
    fn detection_is_deterministic(values in ndvi_strategy(10, 40)) {
        let series = make_series(&values);
        let detector = EventDetector::new(DetectionConfig::default());

        for algorithm in ALL_ALGORITHMS {
            let a = detector.detect(&series, algorithm);
            let b = detector.detect(&series, algorithm);
            prop_assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b.iter()) {
                prop_assert_eq!(x.start_date, y.start_date);
                prop_assert_eq!(x.peak_date, y.peak_date);
                prop_assert_eq!(x.end_date, y.end_date);
            }
        }
    }
}
