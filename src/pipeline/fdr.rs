//! Fisher Discriminant Ratio ranking

use std::collections::BTreeMap;

use polars::prelude::*;

use super::dataset::FeatureMatrix;
use super::error::{FeatureError, Result};
use super::results::{sort_descending, FdrResult, FeatureScore};

/// Added to every class variance so constant features stay finite
pub const FDR_EPSILON: f64 = 1e-8;

/// Row indices grouped by class, classes in a deterministic order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPartition {
    pub classes: Vec<String>,
    pub members: Vec<Vec<usize>>,
}

impl ClassPartition {
    /// Group rows by label value.
    ///
    /// Numeric labels without missing values are ordered numerically; any
    /// other label column is ordered by its text form, with missing labels
    /// forming a class of their own.
    pub fn from_labels(labels: &Column) -> Result<Self> {
        if labels.dtype().is_primitive_numeric() && labels.null_count() == 0 {
            let floats = labels.cast(&DataType::Float64)?;
            let mut keyed: Vec<(f64, usize)> = floats
                .f64()?
                .iter()
                .flatten()
                .enumerate()
                .map(|(row, v)| (v, row))
                .collect();
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

            let mut classes: Vec<String> = Vec::new();
            let mut members: Vec<Vec<usize>> = Vec::new();
            let mut current: Option<f64> = None;
            for (value, row) in keyed {
                if current != Some(value) {
                    current = Some(value);
                    classes.push(value.to_string());
                    members.push(Vec::new());
                }
                if let Some(group) = members.last_mut() {
                    group.push(row);
                }
            }
            return Ok(Self { classes, members });
        }

        let text = labels.cast(&DataType::String)?;
        let mut groups: BTreeMap<Option<String>, Vec<usize>> = BTreeMap::new();
        for (row, value) in text.str()?.iter().enumerate() {
            groups
                .entry(value.map(str::to_string))
                .or_default()
                .push(row);
        }

        let (classes, members) = groups
            .into_iter()
            .map(|(key, rows)| (key.unwrap_or_else(|| "null".to_string()), rows))
            .unzip();
        Ok(Self { classes, members })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Population mean and variance of `values` at `rows`.
fn class_moments(values: &[f64], rows: &[usize]) -> (f64, f64) {
    let n = rows.len() as f64;
    let mean = rows.iter().map(|&r| values[r]).sum::<f64>() / n;
    let var = rows
        .iter()
        .map(|&r| {
            let d = values[r] - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, var)
}

/// FDR score of one feature.
///
/// Sums `(mean_i - mean_j)^2 / (var_i + var_j)` over every ordered pair of
/// distinct classes, so each unordered pair contributes twice.
///
/// Returns `None` when a class mean or variance is not finite (infinite
/// cells, or sums that overflow).
pub fn fisher_discriminant_ratio(values: &[f64], partition: &ClassPartition) -> Option<f64> {
    let mut moments: Vec<(f64, f64)> = Vec::with_capacity(partition.len());
    for rows in &partition.members {
        let (mean, var) = class_moments(values, rows);
        if !mean.is_finite() || !var.is_finite() {
            return None;
        }
        moments.push((mean, var + FDR_EPSILON));
    }

    let mut score = 0.0;
    for (i, (mean_i, var_i)) in moments.iter().enumerate() {
        for (j, (mean_j, var_j)) in moments.iter().enumerate() {
            if i != j {
                score += (mean_i - mean_j).powi(2) / (var_i + var_j);
            }
        }
    }
    Some(score)
}

/// Rank every feature by FDR, highest first. Ties keep column order.
pub fn compute_fdr(features: &FeatureMatrix, partition: &ClassPartition) -> Result<FdrResult> {
    if features.rows == 0 || partition.is_empty() {
        return Err(FeatureError::InsufficientData(
            "FDR needs at least one labelled row".to_string(),
        ));
    }
    if let Some(pos) = partition.members.iter().position(|rows| rows.is_empty()) {
        return Err(FeatureError::InsufficientData(format!(
            "class '{}' has no rows",
            partition.classes[pos]
        )));
    }
    if let Some(&row) = partition.members.iter().flatten().find(|&&r| r >= features.rows) {
        return Err(FeatureError::InsufficientData(format!(
            "label row {} has no matching feature row",
            row
        )));
    }

    let mut scores: Vec<FeatureScore> = Vec::with_capacity(features.width());
    for (name, values) in features.names.iter().zip(features.columns.iter()) {
        let score = fisher_discriminant_ratio(values, partition).ok_or_else(|| {
            FeatureError::InsufficientData(format!(
                "feature '{}' has non-finite class statistics",
                name
            ))
        })?;
        scores.push(FeatureScore::new(name.clone(), score));
    }

    sort_descending(&mut scores);
    Ok(FdrResult { scores })
}
