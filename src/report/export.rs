//! JSON export of the current statistics results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CrossCorrelationResult, FdrResult, PearsonResult, Session};

/// Metadata about the session the results were computed from
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// featstat version
    pub featstat_version: String,
    /// Input file path, when the dataset came from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    /// Target column name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
    /// Rows in the dataset at export time
    pub rows: usize,
    /// Feature columns in the dataset at export time
    pub feature_columns: Vec<String>,
}

/// Results that are valid for the current dataset, with metadata
#[derive(Debug, Serialize)]
pub struct ResultsExport<'a> {
    pub metadata: ExportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fdr: Option<&'a FdrResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pearson: Option<&'a PearsonResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_correlation: Option<&'a CrossCorrelationResult>,
}

impl ResultsExport<'_> {
    pub fn is_empty(&self) -> bool {
        self.fdr.is_none() && self.pearson.is_none() && self.cross_correlation.is_none()
    }
}

/// Collect the session's current results. Stale results are left out.
pub fn build_export(session: &Session) -> ResultsExport<'_> {
    let dataset = session.dataset();

    ResultsExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            featstat_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: session.source().map(|p| p.display().to_string()),
            target_column: dataset.target_name(),
            rows: dataset.row_count(),
            feature_columns: dataset.column_names(),
        },
        fdr: session.fdr(),
        pearson: session.pearson(),
        cross_correlation: session.cross_correlation(),
    }
}

/// Write the current results to a pretty-printed JSON file.
pub fn export_results(session: &Session, path: &Path) -> Result<()> {
    let export = build_export(session);
    if export.is_empty() {
        anyhow::bail!("No up-to-date results to export; compute a statistic first");
    }

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize results to JSON")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;

    Ok(())
}
