//! Unit tests for Fisher Discriminant Ratio ranking

use featstat::pipeline::{
    ColumnKey, FeatureError, FeatureStatistics, NonNumericPolicy, Ranking, StatisticsConfig,
    FDR_EPSILON,
};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_identical_features_score_the_same() {
    let mut ds = common::load(common::IDENTICAL_FEATURES_CSV);
    ds.select_target(&ColumnKey::parse("label")).unwrap();
    let mut stats = FeatureStatistics::default();

    let result = stats.compute_fdr(&ds).unwrap();

    let a = result.score_of("a").unwrap();
    let b = result.score_of("b").unwrap();
    assert_eq!(a, b, "Identical data must give identical scores");
    assert!(a > 0.0, "Class means differ, so FDR must be positive");
}

#[test]
fn test_two_classes_count_the_pair_twice() {
    // Ordered-pair summation: (0,1) and (1,0) both contribute.
    // This doubles the textbook single-pair ratio and is kept on purpose.
    let mut ds = common::load(common::IDENTICAL_FEATURES_CSV);
    ds.select_target(&ColumnKey::parse("label")).unwrap();
    let mut stats = FeatureStatistics::default();

    let result = stats.compute_fdr(&ds).unwrap();

    // class 0: mean 1.5, var 0.25; class 1: mean 3.5, var 0.25
    let single_pair = (1.5f64 - 3.5).powi(2) / ((0.25 + FDR_EPSILON) + (0.25 + FDR_EPSILON));
    common::assert_close(result.score_of("a").unwrap(), 2.0 * single_pair, 1e-12);
}

#[test]
fn test_three_classes() {
    let mut ds = common::load("f,y\n1,0\n3,0\n5,1\n7,1\n10,2\n10,2\n");
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    let mut stats = FeatureStatistics::default();

    let result = stats.compute_fdr(&ds).unwrap();

    // means 2, 6, 10; variances 1, 1, 0 (plus epsilon)
    let means = [2.0f64, 6.0, 10.0];
    let vars = [1.0 + FDR_EPSILON, 1.0 + FDR_EPSILON, FDR_EPSILON];
    let mut expected = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                expected += (means[i] - means[j]).powi(2) / (vars[i] + vars[j]);
            }
        }
    }
    common::assert_close(result.score_of("f").unwrap(), expected, 1e-9);
}

#[test]
fn test_sorted_descending_with_stable_ties() {
    let mut ds = common::load(
        "noise,a,strong,b,y\n\
         5,1,0,1,0\n\
         1,2,0,2,0\n\
         4,3,9,3,1\n\
         2,4,9,4,1\n",
    );
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    let mut stats = FeatureStatistics::default();

    let result = stats.compute_fdr(&ds).unwrap();

    assert_eq!(result.features(), vec!["strong", "a", "b", "noise"]);
    let scores: Vec<f64> = result.scores().iter().map(|s| s.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_constant_feature_scores_zero() {
    let mut ds = common::load("k,y\n3,0\n3,0\n3,1\n3,1\n");
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    let mut stats = FeatureStatistics::default();

    let result = stats.compute_fdr(&ds).unwrap();

    assert_eq!(result.score_of("k"), Some(0.0));
}

#[test]
fn test_text_labels() {
    let mut ds = common::load(common::MIXED_CSV);
    ds.select_target(&ColumnKey::parse("species")).unwrap();
    let mut stats = FeatureStatistics::default();

    let result = stats.compute_fdr(&ds).unwrap();

    assert_eq!(result.len(), 2, "Only the numeric features are ranked");
    assert_eq!(result.features()[0], "petal", "Petal separates species best");
    assert!(result.score_of("colour").is_none());
}

#[test]
fn test_text_feature_rejected_under_fail_policy() {
    let mut ds = common::load(common::MIXED_CSV);
    ds.select_target(&ColumnKey::parse("species")).unwrap();
    let mut stats = FeatureStatistics::new(StatisticsConfig {
        non_numeric: NonNumericPolicy::Fail,
    });

    let err = stats.compute_fdr(&ds).unwrap_err();

    assert!(matches!(err, FeatureError::NonNumericColumn(ref c) if c == "colour"));
}

#[test]
fn test_feature_with_missing_values_is_excluded() {
    let mut ds = common::load("a,gappy,y\n1,1,0\n2,,0\n3,3,1\n4,4,1\n");
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    let mut stats = FeatureStatistics::default();

    let result = stats.compute_fdr(&ds).unwrap();

    assert_eq!(result.features(), vec!["a"]);
}

#[test]
fn test_fdr_requires_target() {
    let ds = common::load(common::IDENTICAL_FEATURES_CSV);
    let mut stats = FeatureStatistics::default();

    assert!(matches!(
        stats.compute_fdr(&ds),
        Err(FeatureError::InsufficientData(_))
    ));
}

#[test]
fn test_fdr_without_rows_is_insufficient() {
    let mut ds = common::load("a,y\n1,0\n");
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    ds.drop_row(0).unwrap();
    let mut stats = FeatureStatistics::default();

    assert!(matches!(
        stats.compute_fdr(&ds),
        Err(FeatureError::InsufficientData(_))
    ));
}

#[test]
fn test_fdr_without_numeric_features_is_insufficient() {
    let mut ds = common::load("name,y\nx,0\nz,1\n");
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    let mut stats = FeatureStatistics::default();

    assert!(matches!(
        stats.compute_fdr(&ds),
        Err(FeatureError::InsufficientData(_))
    ));
}

#[test]
fn test_infinite_cells_are_insufficient() {
    let mut ds = common::load("a,wild,y\n1,inf,0\n2,1,0\n3,2,1\n4,3,1\n");
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    let mut stats = FeatureStatistics::default();

    let err = stats.compute_fdr(&ds).unwrap_err();

    assert!(matches!(err, FeatureError::InsufficientData(ref msg) if msg.contains("wild")));
    assert!(stats.last_fdr(&ds).is_none());
}

#[test]
fn test_overflowing_class_sum_is_insufficient() {
    let mut ds = common::load("a,huge,y\n1,1e308,0\n2,1e308,0\n3,1,1\n4,2,1\n");
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    let mut stats = FeatureStatistics::default();

    assert!(matches!(
        stats.compute_fdr(&ds),
        Err(FeatureError::InsufficientData(_))
    ));
}

#[test]
fn test_overflowing_score_still_ranks_first() {
    let mut ds = common::load(
        "a,big,b,y\n\
         1,1e200,4,0\n\
         2,1e200,3,0\n\
         3,-1e200,2,1\n\
         4,-1e200,1,1\n",
    );
    ds.select_target(&ColumnKey::parse("y")).unwrap();
    let mut stats = FeatureStatistics::default();

    let result = stats.compute_fdr(&ds).unwrap();

    assert_eq!(result.features(), vec!["big", "a", "b"]);
    assert_eq!(result.score_of("big"), Some(f64::INFINITY));
    let scores: Vec<f64> = result.scores().iter().map(|s| s.score).collect();
    assert!(scores.iter().all(|s| !s.is_nan()));
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}
