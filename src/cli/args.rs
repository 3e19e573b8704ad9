//! Command-line argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::pipeline::{LoadOptions, NonNumericPolicy, StatisticsConfig};

/// featstat - Rank dataset features by Fisher discriminant ratio and correlation
#[derive(Parser, Debug)]
#[command(name = "featstat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (delimited text).
    /// Optional in interactive mode, where a file can be opened from the menu.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Field delimiter. Use "tab" or "\t" for tab-separated files.
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: char,

    /// The first line holds data, not column names. Columns are then named 0, 1, 2, ...
    #[arg(long, default_value = "false")]
    pub no_header: bool,

    /// Target column, by name or zero-based position
    #[arg(short, long)]
    pub target: Option<String>,

    /// Columns to drop before any statistic (comma-separated names or positions).
    /// Applied after the target is selected.
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Rows to drop (comma-separated zero-based indices of the loaded file)
    #[arg(long, value_delimiter = ',')]
    pub drop_rows: Vec<usize>,

    /// Pearson threshold - report features in pairs with |r| at or above this value
    #[arg(long, default_value = "0.9", value_parser = parse_threshold)]
    pub threshold: f64,

    /// How to treat text columns and columns with missing values
    #[arg(long, value_enum, default_value_t = NonNumericArg::Exclude)]
    pub non_numeric: NonNumericArg,

    /// Run every statistic once and exit instead of opening the interactive menu
    #[arg(long, default_value = "false")]
    pub batch: bool,

    /// Write the computed results to this JSON file
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Maximum rows shown in dataset previews
    #[arg(long, default_value = "20")]
    pub preview_rows: usize,
}

/// Command-line spelling of [`NonNumericPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NonNumericArg {
    /// Skip non-numeric columns
    Exclude,
    /// Stop with an error
    Fail,
}

impl From<NonNumericArg> for NonNumericPolicy {
    fn from(arg: NonNumericArg) -> Self {
        match arg {
            NonNumericArg::Exclude => NonNumericPolicy::Exclude,
            NonNumericArg::Fail => NonNumericPolicy::Fail,
        }
    }
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter as u8,
            has_header: !self.no_header,
        }
    }

    pub fn statistics_config(&self) -> StatisticsConfig {
        StatisticsConfig {
            non_numeric: self.non_numeric.into(),
        }
    }
}

/// Parse a delimiter argument into a single ASCII character.
pub fn parse_delimiter(s: &str) -> Result<char, String> {
    match s {
        "tab" | "\\t" | "\t" => return Ok('\t'),
        _ => {}
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{}'",
            s
        )),
    }
}

/// Validator for the Pearson threshold
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() {
        Err(format!("threshold must be a finite number, got {}", value))
    } else {
        Ok(value)
    }
}
