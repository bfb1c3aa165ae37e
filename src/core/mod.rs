//! Core data structures shared by the analysis components.

pub mod config;
pub mod event;
pub mod prediction;
pub mod series;

pub use config::DetectionConfig;
pub use event::{ConfidenceLevel, EventType, FloweringEvent};
pub use prediction::Prediction;
pub use series::{
    Location, Observation, QualityFlag, RawTimeSeries, SeriesRecord, VegetationSeries,
};
