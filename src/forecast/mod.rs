//! Seasonal-pattern forecasting.

mod forecaster;
mod seasonal;

pub use forecaster::{ForecastConfig, Forecaster};
pub use seasonal::SeasonalPattern;
