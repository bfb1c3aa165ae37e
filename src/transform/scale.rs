//! Scaling transforms for feature matrices.

/// Result of a scaling transform, retaining the parameters used.
#[derive(Debug, Clone)]
pub struct ScaleResult {
    /// Transformed data
    pub data: Vec<f64>,
    /// Center value used (mean)
    pub center: f64,
    /// Scale value used (standard deviation, 1.0 for constant input)
    pub scale: f64,
}

/// Standardize data to zero mean and unit variance (z-score).
///
/// Constant input scales to all zeros rather than dividing by zero.
pub fn standardize(series: &[f64]) -> ScaleResult {
    if series.is_empty() {
        return ScaleResult {
            data: Vec::new(),
            center: 0.0,
            scale: 1.0,
        };
    }

    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let variance = series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let scale = if std < 1e-10 { 1.0 } else { std };
    let data = series.iter().map(|&x| (x - mean) / scale).collect();

    ScaleResult {
        data,
        center: mean,
        scale,
    }
}

/// Standardize each column of a row-major feature matrix independently.
pub fn standardize_columns(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if rows.is_empty() {
        return Vec::new();
    }
    let n_cols = rows[0].len();

    let mut scaled = vec![vec![0.0; n_cols]; rows.len()];
    for col in 0..n_cols {
        let column: Vec<f64> = rows.iter().map(|r| r[col]).collect();
        let result = standardize(&column);
        for (row, &v) in result.data.iter().enumerate() {
            scaled[row][col] = v;
        }
    }
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn standardize_zero_mean_unit_variance() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = standardize(&series);

        let mean: f64 = result.data.iter().sum::<f64>() / result.data.len() as f64;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-10);

        let var: f64 =
            result.data.iter().map(|x| x * x).sum::<f64>() / result.data.len() as f64;
        assert_relative_eq!(var, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn standardize_constant_gives_zeros() {
        let result = standardize(&[3.0; 8]);
        assert!(result.data.iter().all(|&v| v == 0.0));
        assert_relative_eq!(result.scale, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn standardize_empty() {
        let result = standardize(&[]);
        assert!(result.data.is_empty());
    }

    #[test]
    fn standardize_columns_independent() {
        let rows = vec![
            vec![1.0, 100.0],
            vec![2.0, 200.0],
            vec![3.0, 300.0],
        ];
        let scaled = standardize_columns(&rows);

        // Both columns become the same standardized ramp.
        for row in &scaled {
            assert_relative_eq!(row[0], row[1], epsilon = 1e-10);
        }
    }
}
