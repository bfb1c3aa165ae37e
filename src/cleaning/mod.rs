//! Time series cleaning pipeline.
//!
//! Repairs a raw observation series (quality masking, outlier correction,
//! smoothing), attaches derived index channels, and scores the result.
//! Every step is a pure transform; the input series is never mutated.

mod filters;
mod indices;
mod quality;

pub use filters::Filter;
pub use indices::derive_indices;
pub use quality::QualityMetrics;

use crate::core::VegetationSeries;
use tracing::{debug, warn};

/// A cleaned series together with its quality summary.
#[derive(Debug, Clone)]
pub struct CleanedSeries {
    pub series: VegetationSeries,
    pub quality: QualityMetrics,
}

/// Applies an ordered filter pipeline to vegetation-index series.
#[derive(Debug, Clone)]
pub struct TimeSeriesCleaner {
    filters: Vec<Filter>,
}

impl Default for TimeSeriesCleaner {
    fn default() -> Self {
        Self {
            filters: Filter::default_pipeline(),
        }
    }
}

impl TimeSeriesCleaner {
    /// Cleaner with the standard pipeline: cloud mask, outlier removal,
    /// temporal smoothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleaner with an explicit filter pipeline.
    pub fn with_filters(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    /// Cleaner from wire filter names. Unknown names are skipped with a
    /// warning rather than failing the request.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let filters = names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let filter = Filter::from_name(name);
                if filter.is_none() {
                    warn!(filter = name, "unknown filter, skipping");
                }
                filter
            })
            .collect();
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Run the pipeline, attach derived indices, and score the result.
    ///
    /// Empty input passes through unchanged with default metrics.
    pub fn clean(&self, series: &VegetationSeries) -> CleanedSeries {
        if series.is_empty() {
            return CleanedSeries {
                series: series.clone(),
                quality: QualityMetrics::compute(series),
            };
        }

        let mut current = series.clone();
        for filter in &self.filters {
            current = filter.apply(&current);
            debug!(filter = filter.name(), "applied filter");
        }

        let current = derive_indices(&current);
        let quality = QualityMetrics::compute(&current);

        CleanedSeries {
            series: current,
            quality,
        }
    }
}
