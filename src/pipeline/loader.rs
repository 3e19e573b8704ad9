//! Delimited text loader
//!
//! Turns raw delimited text into a polars [`DataFrame`]. Parsing is strict:
//! every record must have the same number of fields as the first one.

use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use polars::prelude::*;

use super::error::{FeatureError, Result};

/// Cell contents treated as missing values
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

/// How raw text is split into columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field separator (single ASCII byte)
    pub delimiter: u8,
    /// Whether the first record holds column names
    pub has_header: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

impl LoadOptions {
    /// Build options from a delimiter character, rejecting non-ASCII separators.
    pub fn new(delimiter: char, has_header: bool) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(FeatureError::Parse(format!(
                "delimiter '{}' is not a single ASCII character",
                delimiter
            )));
        }
        Ok(Self {
            delimiter: delimiter as u8,
            has_header,
        })
    }
}

/// Parse delimited text into a DataFrame.
///
/// Columns whose non-missing cells all parse as numbers become nullable
/// `Float64` columns; every other column is kept as raw text. Without a header,
/// columns are named by their zero-based position.
pub fn parse_delimited(raw: &str, options: &LoadOptions) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(false)
        .from_reader(raw.as_bytes());

    let mut records: Vec<StringRecord> = Vec::new();
    for record in reader.records() {
        records.push(record.map_err(|e| FeatureError::Parse(e.to_string()))?);
    }

    if records.is_empty() {
        return Err(FeatureError::Parse("input contains no records".to_string()));
    }

    let (names, data_rows) = if options.has_header {
        let header = records.remove(0);
        (normalize_header(&header), records)
    } else {
        let width = records[0].len();
        ((0..width).map(|i| i.to_string()).collect(), records)
    };

    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&str> = data_rows.iter().map(|row| &row[idx]).collect();
            build_column(name, &cells)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Read a file and parse it with [`parse_delimited`].
pub fn read_delimited_file(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        FeatureError::Parse(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_delimited(&raw, options)
}

/// Make header names unique and non-empty.
///
/// Blank names become `Unnamed: <pos>`; repeated names get `.1`, `.2`, ...
fn normalize_header(header: &StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();

    header
        .iter()
        .enumerate()
        .map(|(pos, raw)| {
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {}", pos)
            } else {
                raw.to_string()
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

/// `None` when the cell is not a number, `Some(None)` when it is missing.
fn parse_numeric_cell(cell: &str) -> Option<Option<f64>> {
    if is_missing(cell) {
        return Some(None);
    }
    match cell.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => Some(Some(v)),
        _ => None,
    }
}

fn build_column(name: &str, cells: &[&str]) -> Column {
    let numeric: Option<Vec<Option<f64>>> = cells.iter().map(|c| parse_numeric_cell(c)).collect();

    match numeric {
        Some(values) => Column::new(name.into(), values),
        None => {
            let text: Vec<Option<String>> = cells
                .iter()
                .map(|c| if is_missing(c) { None } else { Some(c.to_string()) })
                .collect();
            Column::new(name.into(), text)
        }
    }
}
