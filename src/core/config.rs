//! Detection tunables.

/// Immutable configuration for event detection.
///
/// Constructed once per request and shared read-only by every strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Minimum NDVI increase over baseline to count as elevated.
    pub ndvi_threshold: f64,
    /// Minimum EVI increase over baseline to count as elevated.
    pub evi_threshold: f64,
    /// Shortest admissible event, in days.
    pub min_duration_days: i64,
    /// Longest admissible event, in days.
    pub max_duration_days: i64,
    /// Moving-average width for difference smoothing.
    pub smoothing_window: usize,
    /// Days of history used for the seasonal baseline.
    pub seasonal_baseline_days: usize,
    /// Seasonal anomaly threshold, in standard deviations.
    pub anomaly_sigma: f64,
    /// Fixed seed for the clustering strategy.
    pub cluster_seed: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ndvi_threshold: 0.15,
            evi_threshold: 0.12,
            min_duration_days: 5,
            max_duration_days: 45,
            smoothing_window: 3,
            seasonal_baseline_days: 365,
            anomaly_sigma: 2.0,
            cluster_seed: 42,
        }
    }
}

impl DetectionConfig {
    /// Set the elevated-NDVI threshold.
    pub fn ndvi_threshold(mut self, threshold: f64) -> Self {
        self.ndvi_threshold = threshold;
        self
    }

    /// Set the admissible duration range in days.
    pub fn duration_range(mut self, min_days: i64, max_days: i64) -> Self {
        self.min_duration_days = min_days;
        self.max_duration_days = max_days;
        self
    }

    /// Set the seasonal anomaly threshold in sigmas.
    pub fn anomaly_sigma(mut self, sigma: f64) -> Self {
        self.anomaly_sigma = sigma;
        self
    }

    /// Set the clustering seed.
    pub fn cluster_seed(mut self, seed: u64) -> Self {
        self.cluster_seed = seed;
        self
    }
}
