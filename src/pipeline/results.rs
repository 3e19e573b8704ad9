//! Ranked result sets produced by the feature statistics

use serde::Serialize;

/// One feature with its score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureScore {
    pub feature: String,
    pub score: f64,
}

impl FeatureScore {
    pub fn new(feature: impl Into<String>, score: f64) -> Self {
        Self {
            feature: feature.into(),
            score,
        }
    }
}

/// Common read access to a ranked list of feature scores.
pub trait Ranking {
    /// Scores in presentation order
    fn scores(&self) -> &[FeatureScore];

    fn len(&self) -> usize {
        self.scores().len()
    }

    fn is_empty(&self) -> bool {
        self.scores().is_empty()
    }

    /// Score of a feature by name
    fn score_of(&self, feature: &str) -> Option<f64> {
        self.scores()
            .iter()
            .find(|s| s.feature == feature)
            .map(|s| s.score)
    }

    /// Feature names in presentation order
    fn features(&self) -> Vec<&str> {
        self.scores().iter().map(|s| s.feature.as_str()).collect()
    }
}

/// Fisher Discriminant Ratio per feature, highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FdrResult {
    pub scores: Vec<FeatureScore>,
}

/// Features involved in at least one pair at or above the threshold, each with
/// its strongest pairwise correlation, highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PearsonResult {
    pub threshold: f64,
    pub scores: Vec<FeatureScore>,
}

/// Sum of absolute correlations against every other feature, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossCorrelationResult {
    pub scores: Vec<FeatureScore>,
}

impl Ranking for FdrResult {
    fn scores(&self) -> &[FeatureScore] {
        &self.scores
    }
}

impl Ranking for PearsonResult {
    fn scores(&self) -> &[FeatureScore] {
        &self.scores
    }
}

impl Ranking for CrossCorrelationResult {
    fn scores(&self) -> &[FeatureScore] {
        &self.scores
    }
}

/// Stable descending sort by score; ties keep their current order.
pub(crate) fn sort_descending(scores: &mut [FeatureScore]) {
    scores.sort_by(|a, b| match (a.score.is_nan(), b.score.is_nan()) {
        (false, false) => b
            .score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal),
        // NaN sorts after every number
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_descending_is_stable() {
        let mut scores = vec![
            FeatureScore::new("a", 1.0),
            FeatureScore::new("b", 2.0),
            FeatureScore::new("c", 1.0),
            FeatureScore::new("d", 2.0),
        ];
        sort_descending(&mut scores);
        let order: Vec<&str> = scores.iter().map(|s| s.feature.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_descending_puts_nan_last() {
        let mut scores = vec![
            FeatureScore::new("n1", f64::NAN),
            FeatureScore::new("a", 0.5),
            FeatureScore::new("n2", f64::NAN),
            FeatureScore::new("b", f64::INFINITY),
            FeatureScore::new("c", 0.9),
        ];
        sort_descending(&mut scores);
        let order: Vec<&str> = scores.iter().map(|s| s.feature.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a", "n1", "n2"]);
    }

    #[test]
    fn test_score_of() {
        let result = CrossCorrelationResult {
            scores: vec![FeatureScore::new("x", 0.5)],
        };
        assert_eq!(result.score_of("x"), Some(0.5));
        assert_eq!(result.score_of("y"), None);
        assert_eq!(result.len(), 1);
    }
}
