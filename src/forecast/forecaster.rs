//! Seasonal-pattern forecasting of vegetation-index values.

use super::seasonal::SeasonalPattern;
use crate::core::{Prediction, VegetationSeries};
use crate::utils::population_std;
use chrono::Duration;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// Forecaster tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Fraction of the historical deviation used as noise amplitude.
    pub noise_scale: f64,
    /// Fixed confidence attached to every forecast step.
    pub base_confidence: f64,
    /// Seed for the noise stream; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            noise_scale: 0.1,
            base_confidence: 0.7,
            seed: None,
        }
    }
}

impl ForecastConfig {
    pub fn noise_scale(mut self, scale: f64) -> Self {
        self.noise_scale = scale;
        self
    }

    pub fn base_confidence(mut self, confidence: f64) -> Self {
        self.base_confidence = confidence;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Forecasts future vegetation-index values from the day-of-year pattern
/// of the observed history.
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Forecast `days_ahead` daily steps past the last observation.
    ///
    /// Each step takes the seasonal pattern value for its day of year plus
    /// Gaussian noise scaled to the historical deviation. The flowering
    /// probability is zero until the prediction exceeds the typical signal
    /// by 15 percent, then grows with the relative excess.
    ///
    /// An empty series yields an empty forecast.
    pub fn predict(
        &self,
        series: &VegetationSeries,
        days_ahead: usize,
        species: &str,
    ) -> Vec<Prediction> {
        let Some(&last_date) = series.dates().last() else {
            return Vec::new();
        };

        debug!(species, days_ahead, "forecasting vegetation index");

        let pattern = SeasonalPattern::from_series(series);

        // The whole history feeds the noise amplitude; repaired points are
        // already cleaned values, not gaps.
        let noise_sigma = self.config.noise_scale * population_std(series.values());

        let mut rng: StdRng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        (1..=days_ahead)
            .map(|step| {
                let date = last_date + Duration::days(step as i64);
                let day_of_year = chrono::Datelike::ordinal(&date);

                let predicted_value =
                    pattern.value_for(day_of_year) + sample_normal(&mut rng) * noise_sigma;

                let typical = pattern.typical_for(day_of_year);
                // A negative typical baseline flips the sign of the ratio;
                // the clamp keeps the probability in [0, 1] either way.
                let flowering_probability = if predicted_value > typical * 1.15 {
                    ((predicted_value - typical) / typical).clamp(0.0, 1.0)
                } else {
                    0.0
                };

                Prediction {
                    date,
                    predicted_value,
                    confidence: self.config.base_confidence,
                    flowering_probability,
                }
            })
            .collect()
    }
}

/// Standard normal draw via Box-Muller.
fn sample_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn history(values: Vec<f64>) -> VegetationSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| base + Duration::days(16 * i as i64))
            .collect();
        VegetationSeries::all_good(dates, values, "NDVI").unwrap()
    }

    #[test]
    fn empty_series_yields_empty_forecast() {
        let series = history(Vec::new());
        let forecaster = Forecaster::default();
        assert!(forecaster.predict(&series, 10, "Cistus ladanifer").is_empty());
    }

    #[test]
    fn forecast_has_consecutive_dates_after_history() {
        let series = history(vec![0.3, 0.4, 0.5, 0.4, 0.3]);
        let forecaster = Forecaster::new(ForecastConfig::default().seed(7));

        let predictions = forecaster.predict(&series, 10, "Cistus ladanifer");

        assert_eq!(predictions.len(), 10);
        let last = *series.dates().last().unwrap();
        for (i, p) in predictions.iter().enumerate() {
            assert_eq!(p.date, last + Duration::days(i as i64 + 1));
        }
    }

    #[test]
    fn confidence_is_the_configured_constant() {
        let series = history(vec![0.3, 0.4, 0.5]);
        let forecaster = Forecaster::new(ForecastConfig::default().base_confidence(0.8).seed(1));
        for p in forecaster.predict(&series, 5, "Quercus ilex") {
            assert_eq!(p.confidence, 0.8);
        }
    }

    #[test]
    fn probability_stays_in_unit_interval() {
        let series = history(vec![0.2, 0.8, 0.3, 0.9, 0.25, 0.85]);
        let forecaster = Forecaster::new(ForecastConfig::default().seed(3));
        for p in forecaster.predict(&series, 30, "Quercus ilex") {
            assert!((0.0..=1.0).contains(&p.flowering_probability));
        }
    }

    #[test]
    fn negative_index_history_keeps_probability_in_range() {
        // Winter senescence can hold the index below zero for months; the
        // negative typical baseline must not flip the probability sign.
        let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = (0..400).map(|i| base + Duration::days(i)).collect();
        let values: Vec<f64> = (0..400)
            .map(|i| if i % 2 == 0 { -0.1 } else { -0.3 })
            .collect();
        let series = VegetationSeries::all_good(dates, values, "NDVI").unwrap();

        let forecaster = Forecaster::new(ForecastConfig::default().seed(5));
        let predictions = forecaster.predict(&series, 60, "Quercus ilex");

        assert_eq!(predictions.len(), 60);
        for p in &predictions {
            assert!(
                (0.0..=1.0).contains(&p.flowering_probability),
                "probability {} out of range on {}",
                p.flowering_probability,
                p.date
            );
        }
    }

    #[test]
    fn fully_repaired_history_still_forecasts_its_pattern() {
        use crate::core::QualityFlag;

        // Every observation was repaired by the cleaner; the pattern must
        // still come from the stored values.
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = (0..6).map(|i| base + Duration::days(16 * i)).collect();
        let flags = vec![QualityFlag::Interpolated; 6];
        let series = VegetationSeries::new(dates, vec![0.4; 6], flags, "NDVI").unwrap();

        let forecaster = Forecaster::new(ForecastConfig::default().noise_scale(0.0).seed(0));

        for p in forecaster.predict(&series, 5, "Cistus ladanifer") {
            assert!((p.predicted_value - 0.4).abs() < 1e-12);
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let series = history(vec![0.3, 0.4, 0.5, 0.4, 0.3]);
        let forecaster = Forecaster::new(ForecastConfig::default().seed(42));

        let a = forecaster.predict(&series, 8, "Cistus ladanifer");
        let b = forecaster.predict(&series, 8, "Cistus ladanifer");

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.predicted_value, y.predicted_value);
        }
    }

    #[test]
    fn flat_history_with_zero_noise_predicts_the_pattern() {
        let series = history(vec![0.4; 6]);
        let forecaster = Forecaster::new(ForecastConfig::default().noise_scale(0.0).seed(0));

        for p in forecaster.predict(&series, 5, "Cistus ladanifer") {
            // Forecast days are unobserved days of year, so the overall
            // mean is the prediction.
            assert!((p.predicted_value - 0.4).abs() < 1e-12);
            assert_eq!(p.flowering_probability, 0.0);
        }
    }
}
