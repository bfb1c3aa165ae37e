//! Day-of-year seasonal baseline learned from history.

use crate::core::VegetationSeries;
use crate::utils::mean;
use std::collections::HashMap;

/// Mean vegetation-index value per day of year.
///
/// Built from the entire historical series, repaired points included; days
/// never observed fall back to the overall mean for values and to a
/// neutral 0.5 for the typical-signal baseline used in probability scaling.
#[derive(Debug, Clone)]
pub struct SeasonalPattern {
    by_day: HashMap<u32, f64>,
    overall_mean: f64,
}

impl SeasonalPattern {
    /// Learn the pattern from all observations of a series. Repaired
    /// (interpolated, outlier-corrected) points carry cleaned values and
    /// count like any other.
    pub fn from_series(series: &VegetationSeries) -> Self {
        let values = series.values();

        let mut groups: HashMap<u32, Vec<f64>> = HashMap::new();
        for i in 0..series.len() {
            groups
                .entry(series.day_of_year(i))
                .or_default()
                .push(values[i]);
        }

        let by_day: HashMap<u32, f64> = groups
            .into_iter()
            .map(|(doy, vals)| (doy, mean(&vals)))
            .collect();

        let overall_mean = if values.is_empty() { 0.0 } else { mean(values) };

        Self {
            by_day,
            overall_mean,
        }
    }

    /// Expected value for a day of year, overall mean when unobserved.
    pub fn value_for(&self, day_of_year: u32) -> f64 {
        self.by_day
            .get(&day_of_year)
            .copied()
            .unwrap_or(self.overall_mean)
    }

    /// Typical-signal baseline for a day of year, neutral 0.5 when
    /// unobserved. Used as the denominator in probability scaling, so the
    /// fallback must stay strictly positive.
    pub fn typical_for(&self, day_of_year: u32) -> f64 {
        self.by_day.get(&day_of_year).copied().unwrap_or(0.5)
    }

    /// Number of distinct observed days of year.
    pub fn observed_days(&self) -> usize {
        self.by_day.len()
    }

    pub fn overall_mean(&self) -> f64 {
        self.overall_mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Datelike, NaiveDate};

    fn series(dates: Vec<NaiveDate>, values: Vec<f64>) -> VegetationSeries {
        VegetationSeries::all_good(dates, values, "NDVI").unwrap()
    }

    #[test]
    fn averages_repeated_days_of_year() {
        // Same calendar day across two years.
        let dates = vec![
            NaiveDate::from_ymd_opt(2023, 4, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
        ];
        let s = series(dates, vec![0.4, 0.6]);
        let pattern = SeasonalPattern::from_series(&s);

        let doy = NaiveDate::from_ymd_opt(2023, 4, 10).unwrap().ordinal();
        assert_relative_eq!(pattern.value_for(doy), 0.5, epsilon = 1e-10);
        assert_eq!(pattern.observed_days(), 1);
    }

    #[test]
    fn unobserved_day_falls_back_to_overall_mean() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
        ];
        let s = series(dates, vec![0.3, 0.5]);
        let pattern = SeasonalPattern::from_series(&s);

        assert_relative_eq!(pattern.value_for(200), 0.4, epsilon = 1e-10);
        assert_relative_eq!(pattern.typical_for(200), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn repaired_points_still_feed_the_pattern() {
        use crate::core::QualityFlag;

        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 26).unwrap(),
        ];
        let flags = vec![QualityFlag::Interpolated, QualityFlag::OutlierCorrected];
        let s = VegetationSeries::new(dates, vec![0.4, 0.6], flags, "NDVI").unwrap();

        let pattern = SeasonalPattern::from_series(&s);

        assert_eq!(pattern.observed_days(), 2);
        assert_relative_eq!(pattern.overall_mean(), 0.5, epsilon = 1e-10);
        let doy = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap().ordinal();
        assert_relative_eq!(pattern.value_for(doy), 0.4, epsilon = 1e-10);
    }

    #[test]
    fn empty_series_yields_zero_mean() {
        let s = series(Vec::new(), Vec::new());
        let pattern = SeasonalPattern::from_series(&s);
        assert_eq!(pattern.observed_days(), 0);
        assert_relative_eq!(pattern.overall_mean(), 0.0);
    }
}
