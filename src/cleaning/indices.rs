//! Derived vegetation-index channels.
//!
//! These are approximations computed from the primary index alone; true
//! EVI/SAVI would need the underlying reflectance bands.

use crate::core::VegetationSeries;

/// Soil adjustment constant for the SAVI approximation.
const SOIL_ADJUSTMENT: f64 = 0.5;

/// Attach approximated EVI, SAVI, and normalized greenness channels.
///
/// Only applies when the series unit is the primary vegetation index
/// (NDVI); other units pass through unchanged.
pub fn derive_indices(series: &VegetationSeries) -> VegetationSeries {
    if series.is_empty() || !series.unit().contains("NDVI") {
        return series.clone();
    }

    let values = series.values();

    let evi: Vec<f64> = values.iter().map(|&v| approximate_evi(v)).collect();

    let savi: Vec<f64> = values
        .iter()
        .map(|&v| v * (1.0 + SOIL_ADJUSTMENT) / (v + SOIL_ADJUSTMENT))
        .collect();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let greenness: Vec<f64> = if range.abs() < 1e-12 {
        vec![0.0; values.len()]
    } else {
        values.iter().map(|&v| (v - min) / range).collect()
    };

    series.with_derived_indices(evi, savi, greenness)
}

/// Empirical NDVI-to-EVI map, clipped to the index's valid range.
fn approximate_evi(ndvi: f64) -> f64 {
    let evi = 2.5 * ndvi / (1.0 + 6.0 * ndvi - 7.5 * ndvi + 1.0);
    evi.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VegetationSeries;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn ndvi_series(values: Vec<f64>) -> VegetationSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect();
        VegetationSeries::all_good(dates, values, "NDVI").unwrap()
    }

    #[test]
    fn derives_all_three_channels_for_ndvi() {
        let series = derive_indices(&ndvi_series(vec![0.2, 0.4, 0.6]));

        assert!(series.evi().is_some());
        assert!(series.savi().is_some());
        let greenness = series.greenness().unwrap();
        assert_relative_eq!(greenness[0], 0.0, epsilon = 1e-10);
        assert_relative_eq!(greenness[1], 0.5, epsilon = 1e-10);
        assert_relative_eq!(greenness[2], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn savi_uses_soil_adjustment() {
        let series = derive_indices(&ndvi_series(vec![0.5]));
        let savi = series.savi().unwrap();
        assert_relative_eq!(savi[0], 0.5 * 1.5 / 1.0, epsilon = 1e-10);
    }

    #[test]
    fn evi_is_clipped_to_unit_range() {
        let series = derive_indices(&ndvi_series(vec![0.9, -0.9, 0.1]));
        for &v in series.evi().unwrap() {
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn constant_series_gets_zero_greenness() {
        let series = derive_indices(&ndvi_series(vec![0.4, 0.4, 0.4]));
        assert!(series.greenness().unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn non_ndvi_units_pass_through() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = VegetationSeries::all_good(
            vec![base, base + chrono::Duration::days(1)],
            vec![0.2, 0.3],
            "EVI",
        )
        .unwrap();
        let out = derive_indices(&series);
        assert!(out.evi().is_none());
        assert!(out.greenness().is_none());
    }
}
