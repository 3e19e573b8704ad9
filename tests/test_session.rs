//! Tests for the session object and its result cache

use featstat::pipeline::{ColumnKey, FeatureError, LoadOptions, Ranking, Session};

#[path = "common/mod.rs"]
mod common;

fn session_with(text: &str) -> Session {
    let mut session = Session::default();
    session.load_text(text, &LoadOptions::default()).unwrap();
    session
}

#[test]
fn test_results_are_cached_until_the_dataset_changes() {
    let mut session = session_with(common::IDENTICAL_FEATURES_CSV);
    session.select_target(&ColumnKey::parse("label")).unwrap();

    session.compute_fdr().unwrap();
    session.compute_cross_correlation().unwrap();
    session.compute_pearson_redundancy(0.5).unwrap();
    assert!(session.fdr().is_some());
    assert!(session.cross_correlation().is_some());
    assert!(session.pearson().is_some());

    session.drop_row(0).unwrap();

    assert!(session.fdr().is_none(), "Stale FDR must not be reused");
    assert!(session.cross_correlation().is_none());
    assert!(session.pearson().is_none());
}

#[test]
fn test_recompute_reflects_current_data() {
    let mut session = session_with("a,b,y\n1,1,0\n2,2,0\n3,3,1\n4,40,1\n");
    session.select_target(&ColumnKey::parse("y")).unwrap();

    let before = session.compute_cross_correlation().unwrap().clone();
    session.drop_row(3).unwrap();
    let after = session.compute_cross_correlation().unwrap().clone();

    common::assert_close(after.score_of("a").unwrap(), 1.0, 1e-9);
    assert!(before.score_of("a").unwrap() < after.score_of("a").unwrap());
}

#[test]
fn test_dropped_column_disappears_from_results() {
    let mut session = session_with(common::CORRELATION_CSV);

    session.drop_column(&ColumnKey::parse("q")).unwrap();
    let result = session.compute_cross_correlation().unwrap();

    assert_eq!(result.features(), vec!["p", "r"]);
}

#[test]
fn test_failed_computation_keeps_other_results() {
    let mut session = session_with(common::CORRELATION_CSV);
    session.compute_cross_correlation().unwrap();

    let err = session.compute_pearson_redundancy(f64::NAN).unwrap_err();

    assert!(matches!(err, FeatureError::InvalidThreshold(_)));
    assert!(session.cross_correlation().is_some());
    assert!(session.pearson().is_none());
}

#[test]
fn test_failed_edit_keeps_results_valid() {
    let mut session = session_with(common::CORRELATION_CSV);
    session.compute_cross_correlation().unwrap();

    assert!(session.drop_row(99).is_err());
    assert!(session.drop_column(&ColumnKey::parse("missing")).is_err());

    assert!(
        session.cross_correlation().is_some(),
        "Nothing changed, so the cached result still applies"
    );
}

#[test]
fn test_reset_clears_everything() {
    let mut session = session_with(common::CORRELATION_CSV);
    session.compute_cross_correlation().unwrap();

    session.reset();

    assert!(session.dataset().is_empty());
    assert!(session.cross_correlation().is_none());
    assert!(matches!(
        session.compute_cross_correlation(),
        Err(FeatureError::InsufficientData(_))
    ));
}

#[test]
fn test_new_load_discards_previous_results() {
    let mut session = session_with(common::CORRELATION_CSV);
    session.compute_cross_correlation().unwrap();

    session
        .load_text(common::CORRELATION_CSV, &LoadOptions::default())
        .unwrap();

    assert!(session.cross_correlation().is_none());
}

#[test]
fn test_load_file_records_source() {
    let (_dir, path) = common::create_temp_csv(common::MIXED_CSV);
    let mut session = Session::default();

    session.load_file(&path, &LoadOptions::default()).unwrap();

    assert_eq!(session.source(), Some(path.as_path()));
    assert_eq!(session.dataset().row_count(), 6);
}
