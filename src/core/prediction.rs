//! Forecast output record.

use chrono::NaiveDate;
use serde::Serialize;

/// A single forecast step.
///
/// `confidence` is a fixed constant chosen by the forecaster configuration
/// rather than derived from data spread; this is a documented limitation of
/// the seasonal-pattern method.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub date: NaiveDate,
    pub predicted_value: f64,
    pub confidence: f64,
    pub flowering_probability: f64,
}
