//! Feature statistics engine with generation-checked result cache

use super::correlation::{compute_cross_correlation, compute_pearson_redundancy};
use super::dataset::{NonNumericPolicy, TabularDataset};
use super::error::{FeatureError, Result};
use super::fdr::{compute_fdr, ClassPartition};
use super::results::{CrossCorrelationResult, FdrResult, PearsonResult};

/// Settings shared by every statistic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsConfig {
    pub non_numeric: NonNumericPolicy,
}

#[derive(Debug, Clone)]
struct Cached<T> {
    generation: u64,
    result: T,
}

impl<T> Cached<T> {
    fn current(&self, dataset: &TabularDataset) -> Option<&T> {
        (self.generation == dataset.generation()).then_some(&self.result)
    }
}

/// Computes FDR, Pearson redundancy and cross-correlation rankings.
///
/// Every compute call works from the dataset as it is now. The last result of
/// each kind is remembered together with the dataset generation it was built
/// from, and is only handed back while that generation is current.
#[derive(Debug, Clone, Default)]
pub struct FeatureStatistics {
    config: StatisticsConfig,
    fdr: Option<Cached<FdrResult>>,
    pearson: Option<Cached<PearsonResult>>,
    cross: Option<Cached<CrossCorrelationResult>>,
}

impl FeatureStatistics {
    pub fn new(config: StatisticsConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    /// Rank features by Fisher Discriminant Ratio against the selected target.
    pub fn compute_fdr(&mut self, dataset: &TabularDataset) -> Result<&FdrResult> {
        let labels = dataset.labels().ok_or_else(|| {
            FeatureError::InsufficientData("no target column selected".to_string())
        })?;
        let features = dataset.feature_matrix(self.config.non_numeric)?;
        let partition = ClassPartition::from_labels(labels)?;
        let result = compute_fdr(&features, &partition)?;

        let cached = self.fdr.insert(Cached {
            generation: dataset.generation(),
            result,
        });
        Ok(&cached.result)
    }

    /// Rank features that are redundant at `threshold`.
    pub fn compute_pearson_redundancy(
        &mut self,
        dataset: &TabularDataset,
        threshold: f64,
    ) -> Result<&PearsonResult> {
        let features = dataset.feature_matrix(self.config.non_numeric)?;
        let result = compute_pearson_redundancy(&features, threshold)?;

        let cached = self.pearson.insert(Cached {
            generation: dataset.generation(),
            result,
        });
        Ok(&cached.result)
    }

    /// Aggregate absolute correlation per feature, in column order.
    pub fn compute_cross_correlation(
        &mut self,
        dataset: &TabularDataset,
    ) -> Result<&CrossCorrelationResult> {
        let features = dataset.feature_matrix(self.config.non_numeric)?;
        let result = compute_cross_correlation(&features)?;

        let cached = self.cross.insert(Cached {
            generation: dataset.generation(),
            result,
        });
        Ok(&cached.result)
    }

    /// Last FDR result, if it still describes `dataset`.
    pub fn last_fdr(&self, dataset: &TabularDataset) -> Option<&FdrResult> {
        self.fdr.as_ref().and_then(|c| c.current(dataset))
    }

    /// Last Pearson result, if it still describes `dataset`.
    pub fn last_pearson(&self, dataset: &TabularDataset) -> Option<&PearsonResult> {
        self.pearson.as_ref().and_then(|c| c.current(dataset))
    }

    /// Last cross-correlation result, if it still describes `dataset`.
    pub fn last_cross_correlation(
        &self,
        dataset: &TabularDataset,
    ) -> Option<&CrossCorrelationResult> {
        self.cross.as_ref().and_then(|c| c.current(dataset))
    }

    /// Forget every cached result.
    pub fn clear(&mut self) {
        self.fdr = None;
        self.pearson = None;
        self.cross = None;
    }
}
