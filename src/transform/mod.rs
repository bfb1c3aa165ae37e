//! Data transformations for time series.

pub mod scale;
pub mod window;

pub use scale::{standardize, standardize_columns, ScaleResult};
pub use window::rolling_mean;
