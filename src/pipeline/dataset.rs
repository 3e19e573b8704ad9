//! Editable in-memory dataset with a detached target column
//!
//! The feature columns live in a polars [`DataFrame`]; the target, once
//! selected, is moved out of the frame into a separate label column so the
//! statistics never treat it as a feature. Rows are always addressed by
//! position, so dropping a row implicitly renumbers the remaining ones.

use std::fmt;
use std::path::Path;

use log::{debug, warn};
use polars::prelude::*;

use super::column_key::ColumnKey;
use super::error::{FeatureError, Result};
use super::loader::{parse_delimited, read_delimited_file, LoadOptions};

/// What to do with columns that cannot feed a numeric statistic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NonNumericPolicy {
    /// Skip text columns and columns with missing values (logged)
    #[default]
    Exclude,
    /// Abort the statistic with [`FeatureError::NonNumericColumn`]
    Fail,
}

/// Dense numeric snapshot of the feature columns, one `Vec` per column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,
    pub rows: usize,
}

impl FeatureMatrix {
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Tabular dataset with an optional label column.
#[derive(Debug, Clone, Default)]
pub struct TabularDataset {
    frame: DataFrame,
    labels: Option<Column>,
    rows: usize,
    generation: u64,
}

impl TabularDataset {
    /// Parse raw delimited text into a new dataset.
    pub fn load(raw: &str, options: &LoadOptions) -> Result<Self> {
        let frame = parse_delimited(raw, options)?;
        Ok(Self::from_frame(frame))
    }

    /// Read and parse a delimited file into a new dataset.
    pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Self> {
        let frame = read_delimited_file(path, options)?;
        debug!("Loaded {} ({} rows)", path.display(), frame.height());
        Ok(Self::from_frame(frame))
    }

    /// Wrap an existing frame. All of its columns become features.
    pub fn from_frame(frame: DataFrame) -> Self {
        let rows = frame.height();
        Self {
            frame,
            labels: None,
            rows,
            generation: 0,
        }
    }

    /// Replace the whole table with freshly parsed text.
    ///
    /// Labels from the previous table are discarded. On failure the current
    /// table is kept as it was.
    pub fn reload(&mut self, raw: &str, options: &LoadOptions) -> Result<()> {
        let fresh = Self::load(raw, options)?;
        self.replace(fresh);
        Ok(())
    }

    /// Replace the whole table with the contents of a delimited file.
    pub fn reload_file(&mut self, path: &Path, options: &LoadOptions) -> Result<()> {
        let fresh = Self::load_file(path, options)?;
        self.replace(fresh);
        Ok(())
    }

    fn replace(&mut self, fresh: TabularDataset) {
        let generation = self.generation + 1;
        *self = fresh;
        self.generation = generation;
    }

    /// Move a column out of the features and into the label slot.
    pub fn select_target(&mut self, key: &ColumnKey) -> Result<()> {
        let idx = self.resolve_column(key)?;
        let name = self.column_names()[idx].clone();

        let mut frame = self.frame.clone();
        let column = frame.drop_in_place(&name)?;

        self.frame = frame;
        self.labels = Some(column);
        self.generation += 1;
        debug!("Selected '{}' as target", name);
        Ok(())
    }

    /// Remove one row from every column and from the labels.
    pub fn drop_row(&mut self, index: usize) -> Result<()> {
        if index >= self.rows {
            return Err(FeatureError::IndexOutOfRange {
                index,
                rows: self.rows,
            });
        }

        let mask: BooleanChunked = (0..self.rows).map(|i| i != index).collect();

        let frame = if self.frame.width() > 0 {
            self.frame.filter(&mask)?
        } else {
            self.frame.clone()
        };
        let labels = match &self.labels {
            Some(labels) => Some(labels.filter(&mask)?),
            None => None,
        };

        self.frame = frame;
        self.labels = labels;
        self.rows -= 1;
        self.generation += 1;
        Ok(())
    }

    /// Remove a feature column entirely.
    pub fn drop_column(&mut self, key: &ColumnKey) -> Result<()> {
        let idx = self.resolve_column(key)?;
        let name = self.column_names()[idx].clone();

        self.frame = self.frame.drop(&name)?;
        self.generation += 1;
        debug!("Dropped column '{}'", name);
        Ok(())
    }

    /// Return to the empty state. Cached statistics become stale.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::default();
        self.generation = generation;
    }

    /// Resolve a key to a column position.
    ///
    /// [`ColumnKey::Index`] first matches a column literally named after the
    /// integer (headerless tables), then falls back to the position.
    pub fn resolve_column(&self, key: &ColumnKey) -> Result<usize> {
        let names = self.column_names();
        let position = match key {
            ColumnKey::Name(name) => names.iter().position(|n| n == name),
            ColumnKey::Index(index) => {
                let literal = index.to_string();
                names
                    .iter()
                    .position(|n| *n == literal)
                    .or_else(|| (*index < names.len()).then_some(*index))
            }
        };
        position.ok_or_else(|| FeatureError::UnknownColumn(key.to_string()))
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// True when there are no feature columns and no labels.
    pub fn is_empty(&self) -> bool {
        self.frame.width() == 0 && self.labels.is_none()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn labels(&self) -> Option<&Column> {
        self.labels.as_ref()
    }

    /// Name of the column currently used as target
    pub fn target_name(&self) -> Option<String> {
        self.labels.as_ref().map(|l| l.name().to_string())
    }

    /// Mutation counter; changes after every successful edit.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Extract the numeric feature columns as dense `f64` vectors.
    ///
    /// A column qualifies when it has a primitive numeric dtype and no missing
    /// values. Others are skipped or rejected according to `policy`.
    pub fn feature_matrix(&self, policy: NonNumericPolicy) -> Result<FeatureMatrix> {
        let mut names = Vec::new();
        let mut columns = Vec::new();
        let mut skipped = Vec::new();

        for column in self.frame.get_columns() {
            let name = column.name().to_string();
            if !column.dtype().is_primitive_numeric() || column.null_count() > 0 {
                match policy {
                    NonNumericPolicy::Fail => return Err(FeatureError::NonNumericColumn(name)),
                    NonNumericPolicy::Exclude => {
                        skipped.push(name);
                        continue;
                    }
                }
            }

            let floats = column.cast(&DataType::Float64)?;
            let values: Vec<f64> = floats.f64()?.iter().flatten().collect();
            names.push(name);
            columns.push(values);
        }

        if !skipped.is_empty() {
            warn!(
                "Excluding {} non-numeric column(s) from statistics: {}",
                skipped.len(),
                skipped.join(", ")
            );
        }

        if columns.is_empty() {
            return Err(FeatureError::InsufficientData(
                "dataset has no numeric feature columns".to_string(),
            ));
        }

        Ok(FeatureMatrix {
            names,
            columns,
            rows: self.rows,
        })
    }
}

impl fmt::Display for TabularDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.frame)?;
        if let Some(labels) = &self.labels {
            writeln!(f, "{}", labels.as_materialized_series())?;
        }
        Ok(())
    }
}
