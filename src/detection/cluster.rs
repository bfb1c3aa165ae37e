//! Clustering-based detection of elevated-signal regimes.

use crate::clustering::{kmeans, KMeansConfig};
use crate::core::DetectionConfig;
use crate::transform::standardize_columns;
use crate::utils::mean;

/// Minimum points needed for a meaningful partition.
const MIN_POINTS: usize = 10;
/// Number of regimes the series is partitioned into.
const N_CLUSTERS: usize = 3;

/// Mark points belonging to the highest-valued cluster.
///
/// Each point gets a 5-feature vector (value, local window mean/spread/
/// range, normalized day-of-year); features are standard-scaled and
/// partitioned into three clusters with a fixed seed. The cluster with the
/// highest mean raw value is flowering only when its mean strictly exceeds
/// the overall mean, so a variance-free series produces no candidates.
///
/// Returns `None` when the features are degenerate (non-finite), letting
/// the detector fall back to change detection.
pub(crate) fn flowering_mask(
    days_of_year: &[u32],
    values: &[f64],
    config: &DetectionConfig,
) -> Option<Vec<bool>> {
    let n = values.len();
    if n < MIN_POINTS {
        return Some(vec![false; n]);
    }

    let features = build_features(days_of_year, values);
    if features
        .iter()
        .any(|row| row.iter().any(|v| !v.is_finite()))
    {
        return None;
    }

    let scaled = standardize_columns(&features);
    let result = kmeans(
        &scaled,
        &KMeansConfig::default()
            .k(N_CLUSTERS)
            .seed(config.cluster_seed),
    );
    if result.labels.len() != n {
        return None;
    }

    // Mean raw value per cluster; the highest one is the flowering regime.
    let mut best_cluster = None;
    let mut best_mean = f64::NEG_INFINITY;
    for cluster in 0..result.centroids.len() {
        let members: Vec<f64> = result
            .cluster_members(cluster)
            .iter()
            .map(|&i| values[i])
            .collect();
        if members.is_empty() {
            continue;
        }
        let cluster_mean = mean(&members);
        if cluster_mean > best_mean {
            best_mean = cluster_mean;
            best_cluster = Some(cluster);
        }
    }

    let flowering = best_cluster?;
    if best_mean <= mean(values) {
        // No cluster stands above the series as a whole.
        return Some(vec![false; n]);
    }

    Some(
        result
            .labels
            .iter()
            .map(|&label| label == flowering)
            .collect(),
    )
}

/// Per-point feature vector: value, ±2-point window statistics, and the
/// normalized day-of-year.
fn build_features(days_of_year: &[u32], values: &[f64]) -> Vec<Vec<f64>> {
    let n = values.len();
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(2);
            let end = (i + 3).min(n);
            let window = &values[start..end];

            let w_mean = mean(window);
            let w_std = crate::utils::population_std(window);
            let w_range = window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
                - window.iter().copied().fold(f64::INFINITY, f64::min);

            vec![
                values[i],
                w_mean,
                w_std,
                w_range,
                days_of_year[i] as f64 / 365.0,
            ]
        })
        .collect()
}
