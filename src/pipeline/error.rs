//! Error types for dataset editing and feature statistics.
//!
//! Every fallible operation in the pipeline returns [`FeatureError`]. A failed
//! operation never leaves the dataset partially mutated, so callers can report
//! the error and keep working with the same session.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading, editing or analyzing a dataset.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Input text could not be turned into a table.
    ///
    /// Raised for inconsistent field counts, empty input, an unusable
    /// delimiter, or a source file that cannot be read.
    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    /// A column key matched neither a column name nor a column position.
    #[error("Column '{0}' does not exist")]
    UnknownColumn(String),

    /// A row index outside `[0, rows)`.
    #[error("Row index {index} is out of range (dataset has {rows} rows)")]
    IndexOutOfRange { index: usize, rows: usize },

    /// The statistic is undefined for the current data.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The Pearson threshold is NaN or infinite.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(f64),

    /// A column cannot take part in a numeric statistic.
    ///
    /// Only raised under [`NonNumericPolicy::Fail`](crate::pipeline::NonNumericPolicy::Fail).
    #[error("Column '{0}' is not numeric or contains missing values")]
    NonNumericColumn(String),

    /// Error surfaced by the dataframe engine.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, FeatureError>;
