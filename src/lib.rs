//! # bloomsense
//!
//! Vegetation-index time series analysis: cleaning pipelines for raw
//! satellite observations, multi-strategy flowering event detection,
//! seasonal forecasting, and phenology metrics.
//!
//! The typical flow is ingest, clean, analyze:
//!
//! ```
//! use bloomsense::prelude::*;
//!
//! let json = r#"{
//!     "location": {"latitude": 40.4, "longitude": -3.7},
//!     "time_series": {
//!         "dates": ["2024-01-01", "2024-01-17", "2024-02-02",
//!                   "2024-02-18", "2024-03-05"],
//!         "values": [0.30, 0.35, 0.40, 0.55, 0.45]
//!     }
//! }"#;
//!
//! let series = SeriesRecord::from_json(json)?.into_series()?;
//! let cleaned = TimeSeriesCleaner::new().clean(&series);
//!
//! let detector = EventDetector::new(DetectionConfig::default());
//! let events = detector.detect(&cleaned.series, Algorithm::ChangeDetection);
//!
//! let forecast = Forecaster::default().predict(&cleaned.series, 30, "Cistus ladanifer");
//! # assert_eq!(forecast.len(), 30);
//! # Ok::<(), bloomsense::AnalysisError>(())
//! ```

pub mod cleaning;
pub mod clustering;
pub mod core;
pub mod detection;
pub mod error;
pub mod forecast;
pub mod phenology;
pub mod transform;
pub mod utils;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::cleaning::{CleanedSeries, Filter, TimeSeriesCleaner};
    pub use crate::core::{
        DetectionConfig, FloweringEvent, Prediction, QualityFlag, SeriesRecord, VegetationSeries,
    };
    pub use crate::detection::{Algorithm, EventDetector};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::forecast::{ForecastConfig, Forecaster};
    pub use crate::phenology::{analyze, PhenologyMetrics};
}
