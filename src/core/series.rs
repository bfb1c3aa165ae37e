//! Vegetation-index series storage and the wire record it is parsed from.

use crate::error::{AnalysisError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Per-observation quality flag. Only the cleaner mutates flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    Good,
    Cloudy,
    Interpolated,
    OutlierCorrected,
}

impl QualityFlag {
    /// Parse a wire flag string.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "good" => Some(QualityFlag::Good),
            "cloudy" => Some(QualityFlag::Cloudy),
            "interpolated" => Some(QualityFlag::Interpolated),
            "outlier_corrected" => Some(QualityFlag::OutlierCorrected),
            _ => None,
        }
    }
}

/// Geographic point the series was sampled at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

/// A single dated observation (view over the column storage).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    pub flag: QualityFlag,
}

/// An ordered vegetation-index series with quality flags and the derived
/// channels attached by the cleaner.
///
/// Dates are assumed strictly increasing; the constructor validates only
/// that the parallel columns have equal length.
#[derive(Debug, Clone)]
pub struct VegetationSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    flags: Vec<QualityFlag>,
    unit: String,
    smoothed: Option<Vec<f64>>,
    evi: Option<Vec<f64>>,
    savi: Option<Vec<f64>>,
    greenness: Option<Vec<f64>>,
    location: Location,
    source: serde_json::Value,
}

impl VegetationSeries {
    /// Create a new series from parallel columns.
    pub fn new(
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        flags: Vec<QualityFlag>,
        unit: impl Into<String>,
    ) -> Result<Self> {
        if values.len() != dates.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        if flags.len() != dates.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: dates.len(),
                got: flags.len(),
            });
        }
        Ok(Self {
            dates,
            values,
            flags,
            unit: unit.into(),
            smoothed: None,
            evi: None,
            savi: None,
            greenness: None,
            location: Location::default(),
            source: serde_json::Value::Null,
        })
    }

    /// Create a series with every point flagged `Good`.
    pub fn all_good(
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        unit: impl Into<String>,
    ) -> Result<Self> {
        let flags = vec![QualityFlag::Good; dates.len()];
        Self::new(dates, values, flags, unit)
    }

    /// Attach the sampling location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Attach source/product metadata passed through to detected events.
    pub fn with_source(mut self, source: serde_json::Value) -> Self {
        self.source = source;
        self
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn flags(&self) -> &[QualityFlag] {
        &self.flags
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn source(&self) -> &serde_json::Value {
        &self.source
    }

    /// Smoothed channel, present after `TemporalSmoothing`.
    pub fn smoothed(&self) -> Option<&[f64]> {
        self.smoothed.as_deref()
    }

    /// Approximated EVI channel, present after cleaning an NDVI series.
    pub fn evi(&self) -> Option<&[f64]> {
        self.evi.as_deref()
    }

    /// Approximated SAVI channel, present after cleaning an NDVI series.
    pub fn savi(&self) -> Option<&[f64]> {
        self.savi.as_deref()
    }

    /// Min-max normalized greenness channel.
    pub fn greenness(&self) -> Option<&[f64]> {
        self.greenness.as_deref()
    }

    /// Get the observation at an index.
    pub fn observation(&self, index: usize) -> Option<Observation> {
        if index >= self.len() {
            return None;
        }
        Some(Observation {
            date: self.dates[index],
            value: self.values[index],
            flag: self.flags[index],
        })
    }

    /// Iterate over observations in order.
    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        (0..self.len()).map(|i| Observation {
            date: self.dates[i],
            value: self.values[i],
            flag: self.flags[i],
        })
    }

    /// Indices of `Good`-flagged observations.
    pub fn good_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &f)| f == QualityFlag::Good)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of `Good`-flagged observations.
    pub fn good_count(&self) -> usize {
        self.flags
            .iter()
            .filter(|&&f| f == QualityFlag::Good)
            .count()
    }

    /// Day-of-year (1..=366) for the observation at an index.
    pub fn day_of_year(&self, index: usize) -> u32 {
        self.dates[index].ordinal()
    }

    /// Return a copy with repaired values and flags (derived channels are
    /// carried over unchanged).
    pub(crate) fn with_repaired(&self, values: Vec<f64>, flags: Vec<QualityFlag>) -> Self {
        let mut out = self.clone();
        out.values = values;
        out.flags = flags;
        out
    }

    /// Return a copy with the smoothed channel set.
    pub(crate) fn with_smoothed(&self, smoothed: Vec<f64>) -> Self {
        let mut out = self.clone();
        out.smoothed = Some(smoothed);
        out
    }

    /// Return a copy with the derived index channels set.
    pub(crate) fn with_derived_indices(
        &self,
        evi: Vec<f64>,
        savi: Vec<f64>,
        greenness: Vec<f64>,
    ) -> Self {
        let mut out = self.clone();
        out.evi = Some(evi);
        out.savi = Some(savi);
        out.greenness = Some(greenness);
        out
    }
}

/// Wire shape of an ingested series record.
///
/// `{location: {..}, time_series: {dates, values, quality_flags?, units?},
/// product_info?}` — quality flags default to `good`, `product_info` is
/// passed through to detected events untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRecord {
    pub location: Location,
    pub time_series: RawTimeSeries,
    #[serde(default)]
    pub product_info: serde_json::Value,
}

/// Raw time-series columns as they arrive on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTimeSeries {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default)]
    pub quality_flags: Option<Vec<String>>,
    #[serde(default)]
    pub units: Option<String>,
}

impl SeriesRecord {
    /// Parse a record from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AnalysisError::InvalidRecord(e.to_string()))
    }

    /// Validate and convert the wire record into a typed series.
    pub fn into_series(self) -> Result<VegetationSeries> {
        let ts = self.time_series;

        if ts.values.len() != ts.dates.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: ts.dates.len(),
                got: ts.values.len(),
            });
        }

        let dates = ts
            .dates
            .iter()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| AnalysisError::InvalidRecord(format!("bad date: {d}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let flags = match ts.quality_flags {
            Some(raw) => {
                if raw.len() != dates.len() {
                    return Err(AnalysisError::LengthMismatch {
                        expected: dates.len(),
                        got: raw.len(),
                    });
                }
                raw.iter()
                    .map(|f| {
                        QualityFlag::from_name(f).ok_or_else(|| {
                            AnalysisError::InvalidRecord(format!("unknown quality flag: {f}"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?
            }
            None => vec![QualityFlag::Good; dates.len()],
        };

        let unit = ts.units.unwrap_or_else(|| "NDVI".to_string());

        Ok(VegetationSeries::new(dates, ts.values, flags, unit)?
            .with_location(self.location)
            .with_source(self.product_info))
    }
}
