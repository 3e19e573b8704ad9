//! Shared test utilities and fixture generators

use featstat::pipeline::{LoadOptions, TabularDataset};
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Two identical features and a binary label
///
/// - `a`, `b`: the same increasing values
/// - `label`: classes 0 and 1, two rows each
pub const IDENTICAL_FEATURES_CSV: &str = "a,b,label\n1,1,0\n2,2,0\n3,3,1\n4,4,1\n";

/// Known correlation structure
///
/// - `p`, `r`: identical (|r| = 1)
/// - `q`: |r| = 0.4 against both `p` and `r`
pub const CORRELATION_CSV: &str = "p,q,r\n1,4,1\n2,1,2\n3,3,3\n4,2,4\n";

/// Three classes with text labels and one text feature
pub const MIXED_CSV: &str = "\
sepal,petal,colour,species
5.1,1.4,red,setosa
4.9,1.5,red,setosa
6.3,4.7,blue,versicolor
6.0,4.5,blue,versicolor
7.1,5.9,green,virginica
6.8,6.1,green,virginica
";

/// Load CSV text with a header row
pub fn load(text: &str) -> TabularDataset {
    TabularDataset::load(text, &LoadOptions::default()).unwrap()
}

/// Load CSV text without a header row
pub fn load_headerless(text: &str) -> TabularDataset {
    TabularDataset::load(text, &LoadOptions::new(',', false).unwrap()).unwrap()
}

/// Values of a numeric feature column
pub fn column_values(ds: &TabularDataset, name: &str) -> Vec<Option<f64>> {
    ds.frame()
        .column(name)
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .collect()
}

/// Values of a numeric label column
pub fn label_values(ds: &TabularDataset) -> Vec<f64> {
    let labels = ds.labels().expect("dataset has no labels");
    let floats = labels.cast(&DataType::Float64).unwrap();
    let values: Vec<f64> = floats.f64().unwrap().iter().flatten().collect();
    values
}

/// Create a temporary directory with a CSV file holding `contents`
pub fn create_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}

/// Assert two floats agree within `tol`
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "Expected {} (±{}), got {}",
        expected,
        tol,
        actual
    );
}

/// Assert the dataset's columns and labels all have `rows` entries
pub fn assert_synchronized(ds: &TabularDataset, rows: usize) {
    assert_eq!(ds.row_count(), rows, "Row count mismatch");
    for column in ds.frame().get_columns() {
        assert_eq!(
            column.len(),
            rows,
            "Column '{}' has {} entries, expected {}",
            column.name(),
            column.len(),
            rows
        );
    }
    if let Some(labels) = ds.labels() {
        assert_eq!(labels.len(), rows, "Labels out of sync with rows");
    }
}
