//! Table rendering for datasets and result rankings

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use polars::prelude::*;

use crate::pipeline::{Ranking, TabularDataset};

/// Decimal places shown for scores
pub const DISPLAY_DECIMALS: i32 = 4;

/// Round a score for display. The stored results keep full precision.
pub fn round_for_display(value: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_DECIMALS);
    (value * factor).round() / factor
}

fn format_score(value: f64) -> String {
    format!("{:.*}", DISPLAY_DECIMALS as usize, round_for_display(value))
}

fn format_cell(value: AnyValue) -> String {
    match value {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Float64(v) => {
            if v.fract() == 0.0 && v.abs() < 1e15 {
                format!("{:.1}", v)
            } else {
                v.to_string()
            }
        }
        other => other.to_string(),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

/// Two-column table of feature names and rounded scores.
pub fn ranking_table(value_header: &str, ranking: &impl Ranking) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![header_cell("Feature"), header_cell(value_header)]);

    for entry in ranking.scores() {
        table.add_row(vec![
            Cell::new(&entry.feature),
            Cell::new(format_score(entry.score)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Preview of the dataset with a row index, the features and the target.
///
/// Shows at most `max_rows` rows.
pub fn dataset_table(dataset: &TabularDataset, max_rows: usize) -> Table {
    let frame = dataset.frame();
    let labels = dataset.labels();

    let mut header = vec![header_cell("#")];
    header.extend(frame.get_column_names().iter().map(|n| header_cell(n.as_str())));
    if let Some(labels) = labels {
        header.push(
            Cell::new(format!("{} (target)", labels.name()))
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
        );
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header);

    let shown = dataset.row_count().min(max_rows);
    for row in 0..shown {
        let mut cells = vec![Cell::new(row).fg(Color::DarkGrey)];
        for column in frame.get_columns() {
            let text = column
                .get(row)
                .map(format_cell)
                .unwrap_or_else(|_| "?".to_string());
            cells.push(Cell::new(text));
        }
        if let Some(labels) = labels {
            let text = labels
                .get(row)
                .map(format_cell)
                .unwrap_or_else(|_| "?".to_string());
            cells.push(Cell::new(text).fg(Color::Cyan));
        }
        table.add_row(cells);
    }

    table
}

/// Print a table indented to line up with the other output.
pub fn print_table(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Print a titled ranking, or a hint when it is empty.
pub fn display_ranking(title: &str, value_header: &str, ranking: &impl Ranking) {
    println!();
    println!("    {}", style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());

    if ranking.is_empty() {
        println!("    {}", style("No features to show").dim());
        return;
    }
    print_table(&ranking_table(value_header, ranking));
}

/// Print the dataset preview with its shape.
pub fn display_dataset(dataset: &TabularDataset, max_rows: usize) {
    println!();
    println!(
        "    {} {}",
        style("DATASET").white().bold(),
        style(format!(
            "({} rows × {} feature columns{})",
            dataset.row_count(),
            dataset.column_count(),
            dataset
                .target_name()
                .map(|t| format!(", target '{}'", t))
                .unwrap_or_default()
        ))
        .dim()
    );
    println!("    {}", style("─".repeat(50)).dim());
    print_table(&dataset_table(dataset, max_rows));

    if dataset.row_count() > max_rows {
        println!(
            "    {}",
            style(format!("... {} more row(s)", dataset.row_count() - max_rows)).dim()
        );
    }
}
