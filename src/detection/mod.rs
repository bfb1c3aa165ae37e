//! Flowering-event detection strategies and the detector entry point.

mod change;
mod cluster;
mod detector;
mod grouping;
mod seasonal;
mod threshold;

pub use detector::{Algorithm, EventDetector};
