//! One editing session: a dataset plus the statistics computed from it

use std::path::{Path, PathBuf};

use super::column_key::ColumnKey;
use super::dataset::TabularDataset;
use super::error::Result;
use super::loader::LoadOptions;
use super::results::{CrossCorrelationResult, FdrResult, PearsonResult};
use super::statistics::{FeatureStatistics, StatisticsConfig};

/// Owns the working dataset and its statistics cache.
///
/// Callers that share a session between threads must serialize access
/// themselves, e.g. with a single mutex around the whole session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: TabularDataset,
    statistics: FeatureStatistics,
    source: Option<PathBuf>,
}

impl Session {
    pub fn new(config: StatisticsConfig) -> Self {
        Self {
            statistics: FeatureStatistics::new(config),
            ..Default::default()
        }
    }

    /// Replace the dataset with parsed text. Cached results are discarded.
    pub fn load_text(&mut self, raw: &str, options: &LoadOptions) -> Result<()> {
        self.dataset.reload(raw, options)?;
        self.statistics.clear();
        self.source = None;
        Ok(())
    }

    /// Replace the dataset with a delimited file. Cached results are discarded.
    pub fn load_file(&mut self, path: &Path, options: &LoadOptions) -> Result<()> {
        self.dataset.reload_file(path, options)?;
        self.statistics.clear();
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    pub fn select_target(&mut self, key: &ColumnKey) -> Result<()> {
        self.dataset.select_target(key)
    }

    pub fn drop_row(&mut self, index: usize) -> Result<()> {
        self.dataset.drop_row(index)
    }

    pub fn drop_column(&mut self, key: &ColumnKey) -> Result<()> {
        self.dataset.drop_column(key)
    }

    /// Clear the dataset and every cached result.
    pub fn reset(&mut self) {
        self.dataset.reset();
        self.statistics.clear();
        self.source = None;
    }

    pub fn compute_fdr(&mut self) -> Result<&FdrResult> {
        self.statistics.compute_fdr(&self.dataset)
    }

    pub fn compute_pearson_redundancy(&mut self, threshold: f64) -> Result<&PearsonResult> {
        self.statistics
            .compute_pearson_redundancy(&self.dataset, threshold)
    }

    pub fn compute_cross_correlation(&mut self) -> Result<&CrossCorrelationResult> {
        self.statistics.compute_cross_correlation(&self.dataset)
    }

    pub fn fdr(&self) -> Option<&FdrResult> {
        self.statistics.last_fdr(&self.dataset)
    }

    pub fn pearson(&self) -> Option<&PearsonResult> {
        self.statistics.last_pearson(&self.dataset)
    }

    pub fn cross_correlation(&self) -> Option<&CrossCorrelationResult> {
        self.statistics.last_cross_correlation(&self.dataset)
    }

    pub fn dataset(&self) -> &TabularDataset {
        &self.dataset
    }

    /// File the current dataset was loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
