//! Non-interactive run: load, edit, compute every statistic, optionally export

use std::time::Instant;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::{ColumnKey, Ranking, Session};
use crate::report::{display_dataset, display_ranking, export_results};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_completion, print_config,
    print_count, print_error, print_info, print_step_header, print_success,
};

use super::args::Cli;

fn print_step_time(started: Instant) {
    println!(
        "    {}",
        style(format!("⏱  {:.2?}", started.elapsed())).dim()
    );
}

/// Run the whole pipeline once from command-line arguments.
pub fn run_batch(cli: &Cli, session: &mut Session) -> Result<()> {
    let input = cli.input.as_ref().ok_or_else(|| {
        anyhow::anyhow!("Input file is required in batch mode. Use -i/--input to specify a file.")
    })?;

    print_config(input, cli.target.as_deref(), cli.delimiter, cli.threshold);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    session
        .load_file(input, &cli.load_options())
        .with_context(|| format!("Failed to load {}", input.display()))?;
    print_success("Dataset loaded");
    println!("      Rows: {}", session.dataset().row_count());
    println!("      Columns: {}", session.dataset().column_count());
    print_step_time(step_start);

    // Step 2: Target selection and pruning
    print_step_header(2, "Prepare Dataset");
    if let Some(target) = &cli.target {
        let key = ColumnKey::parse(target);
        session
            .select_target(&key)
            .with_context(|| format!("Cannot use '{}' as target", target))?;
        print_success(&format!("Target set to '{}'", target));
    } else {
        print_info("No target selected; FDR will be skipped");
    }

    if !cli.drop_columns.is_empty() {
        for token in &cli.drop_columns {
            let key = ColumnKey::parse(token);
            session
                .drop_column(&key)
                .with_context(|| format!("Cannot drop column '{}'", token))?;
        }
        print_count("column(s) dropped", cli.drop_columns.len());
    }

    if !cli.drop_rows.is_empty() {
        // Highest index first so the remaining indices still refer to the loaded file
        let mut rows = cli.drop_rows.clone();
        rows.sort_unstable_by(|a, b| b.cmp(a));
        rows.dedup();
        for &row in &rows {
            session
                .drop_row(row)
                .with_context(|| format!("Cannot drop row {}", row))?;
        }
        print_count("row(s) dropped", rows.len());
    }

    display_dataset(session.dataset(), cli.preview_rows);

    // Step 3: Statistics
    print_step_header(3, "Feature Statistics");
    let mut failures = 0usize;

    if session.dataset().labels().is_some() {
        let spinner = create_spinner("Computing Fisher discriminant ratio...");
        match session.compute_fdr() {
            Ok(result) => {
                finish_with_success(&spinner, "FDR computed");
                display_ranking("FISHER DISCRIMINANT RATIO", "FDR", result);
            }
            Err(e) => {
                finish_with_warning(&spinner, "FDR failed");
                print_error(&e.to_string());
                failures += 1;
            }
        }
    }

    let spinner = create_spinner("Computing Pearson correlations...");
    match session.compute_pearson_redundancy(cli.threshold) {
        Ok(result) => {
            finish_with_success(&spinner, "Pearson redundancy computed");
            print_count(
                &format!("feature(s) with |r| >= {}", cli.threshold),
                result.len(),
            );
            display_ranking("PEARSON REDUNDANCY", "Pearson", result);
        }
        Err(e) => {
            finish_with_warning(&spinner, "Pearson redundancy failed");
            print_error(&e.to_string());
            failures += 1;
        }
    }

    let spinner = create_spinner("Computing cross-correlation...");
    match session.compute_cross_correlation() {
        Ok(result) => {
            finish_with_success(&spinner, "Cross-correlation computed");
            display_ranking("CROSS-CORRELATION", "Cross-correlation", result);
        }
        Err(e) => {
            finish_with_warning(&spinner, "Cross-correlation failed");
            print_error(&e.to_string());
            failures += 1;
        }
    }

    // Step 4: Export
    if let Some(path) = &cli.export {
        print_step_header(4, "Export Results");
        export_results(session, path)?;
        print_success(&format!("Results written to {}", path.display()));
    }

    if failures > 0 {
        anyhow::bail!("{} statistic(s) could not be computed", failures);
    }

    print_completion();
    Ok(())
}
