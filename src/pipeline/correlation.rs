//! Pearson correlation matrix, redundancy filtering and cross-correlation

use std::collections::HashMap;

use faer::Mat;
use log::warn;
use rayon::prelude::*;

use super::dataset::FeatureMatrix;
use super::error::{FeatureError, Result};
use super::results::{sort_descending, CrossCorrelationResult, FeatureScore, PearsonResult};

/// Threshold for auto-selecting matrix vs pairwise correlation computation.
/// Matrix multiplication is more efficient when there are many columns.
const MATRIX_METHOD_COLUMN_THRESHOLD: usize = 15;

/// Square matrix of absolute Pearson correlations between feature columns.
///
/// Entries are in `[0, 1]`. Pairs involving a constant column are 0.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    fn zeros(names: Vec<String>) -> Self {
        let n = names.len();
        Self {
            names,
            values: vec![0.0; n * n],
        }
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size() + j]
    }

    fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        let n = self.size();
        self.values[i * n + j] = value;
        self.values[j * n + i] = value;
    }
}

/// Compute Pearson correlation with a single-pass Welford update.
///
/// Returns `None` for empty or mismatched inputs and when either side has
/// zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n == 0 || n != y.len() {
        return None;
    }

    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        count += 1.0;
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        var_x += dx * (xi - mean_x);
        var_y += dy * (yi - mean_y);
        cov_xy += dx * (yi - mean_y);
    }

    let std_x = (var_x / count).sqrt();
    let std_y = (var_y / count).sqrt();

    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }

    Some(cov_xy / (count * std_x * std_y))
}

/// Fold a raw coefficient into `[0, 1]`; undefined values become 0.
fn magnitude(corr: Option<f64>) -> f64 {
    match corr {
        Some(c) if c.is_finite() => c.abs().min(1.0),
        _ => 0.0,
    }
}

fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

fn check_rows(features: &FeatureMatrix) -> Result<()> {
    if features.rows < 2 {
        return Err(FeatureError::InsufficientData(format!(
            "correlation needs at least 2 rows, dataset has {}",
            features.rows
        )));
    }
    Ok(())
}

/// Fill the upper triangle pair by pair, in parallel.
pub fn correlation_matrix_pairwise(features: &FeatureMatrix) -> Result<CorrelationMatrix> {
    check_rows(features)?;

    let n = features.width();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let values: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let corr = pearson_correlation(&features.columns[i], &features.columns[j]);
            (i, j, magnitude(corr))
        })
        .collect();

    let mut matrix = CorrelationMatrix::zeros(features.names.clone());
    for (i, j, value) in values {
        matrix.set_symmetric(i, j, value);
    }
    Ok(matrix)
}

/// Compute the matrix as `ZᵀZ` over standardized columns.
///
/// Algorithm:
/// 1. Standardize each column: `z = (x - mean) / (std * sqrt(n))`
/// 2. Constant columns become all-zero, so every pair with them is 0
/// 3. `R = ZᵀZ`
pub fn correlation_matrix_blocked(features: &FeatureMatrix) -> Result<CorrelationMatrix> {
    check_rows(features)?;

    let n_rows = features.rows;
    let n_cols = features.width();
    let scale = (n_rows as f64).sqrt();

    let standardized: Vec<Vec<f64>> = features
        .columns
        .par_iter()
        .map(|col| {
            // The mean of a constant column can be off by one ulp, leaving a
            // tiny spurious std; test the values themselves instead
            if is_constant(col) {
                return vec![0.0; n_rows];
            }
            let mean = col.iter().sum::<f64>() / n_rows as f64;
            let var = col.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n_rows as f64;
            let std = var.sqrt();
            if std == 0.0 || !std.is_finite() {
                return vec![0.0; n_rows];
            }
            col.iter().map(|x| (x - mean) / (std * scale)).collect()
        })
        .collect();

    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for (col_idx, col_data) in standardized.iter().enumerate() {
        for (row_idx, &val) in col_data.iter().enumerate() {
            z[(row_idx, col_idx)] = val;
        }
    }

    let corr = z.transpose() * &z;

    let mut matrix = CorrelationMatrix::zeros(features.names.clone());
    for i in 0..n_cols {
        for j in (i + 1)..n_cols {
            matrix.set_symmetric(i, j, magnitude(Some(corr[(i, j)])));
        }
    }
    Ok(matrix)
}

/// Absolute correlation matrix with a zero diagonal, using the faster method
/// for the column count.
pub fn correlation_matrix(features: &FeatureMatrix) -> Result<CorrelationMatrix> {
    if features.width() >= MATRIX_METHOD_COLUMN_THRESHOLD {
        correlation_matrix_blocked(features)
    } else {
        correlation_matrix_pairwise(features)
    }
}

/// Sum each feature's absolute correlations with all other features.
///
/// Output keeps the dataset column order.
pub fn compute_cross_correlation(features: &FeatureMatrix) -> Result<CrossCorrelationResult> {
    let matrix = correlation_matrix(features)?;
    let n = matrix.size();

    let scores = (0..n)
        .map(|i| {
            // Diagonal entries are stored as 0
            let total: f64 = (0..n).map(|j| matrix.get(i, j)).sum();
            FeatureScore::new(matrix.names()[i].clone(), total)
        })
        .collect();

    Ok(CrossCorrelationResult { scores })
}

/// Find features that take part in a pair with `|r| >= threshold`.
///
/// Pairs are visited in row-major upper-triangle order. Each feature keeps the
/// largest coefficient it reached; an equal value never replaces the stored
/// one. The final list is stably sorted by that value, highest first.
pub fn compute_pearson_redundancy(
    features: &FeatureMatrix,
    threshold: f64,
) -> Result<PearsonResult> {
    if !threshold.is_finite() {
        return Err(FeatureError::InvalidThreshold(threshold));
    }
    if !(0.0..=1.0).contains(&threshold) {
        warn!(
            "Pearson threshold {} is outside [0, 1]; absolute correlations always fall inside it",
            threshold
        );
    }

    let matrix = correlation_matrix(features)?;
    let n = matrix.size();

    let mut selected: Vec<FeatureScore> = Vec::new();
    let mut positions: HashMap<usize, usize> = HashMap::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let corr = matrix.get(i, j);
            if corr < threshold {
                continue;
            }
            for feature in [i, j] {
                match positions.get(&feature) {
                    Some(&pos) => {
                        if selected[pos].score < corr {
                            selected[pos].score = corr;
                        }
                    }
                    None => {
                        positions.insert(feature, selected.len());
                        selected.push(FeatureScore::new(matrix.names()[feature].clone(), corr));
                    }
                }
            }
        }
    }

    sort_descending(&mut selected);

    Ok(PearsonResult {
        threshold,
        scores: selected,
    })
}
