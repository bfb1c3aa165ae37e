//! Shared numeric utilities.

pub mod stats;

pub use stats::{mean, population_std, population_variance, quantile, sample_std, trapezoid};
