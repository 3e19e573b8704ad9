//! Interactive session menu
//!
//! Mirrors the actions of a desktop analysis window: open a file, pick the
//! target, prune rows and columns, compute statistics and look at the results.
//! Failures from the pipeline are printed and the menu keeps running.

use std::fmt;

use anyhow::Result;
use dialoguer::Select;

use crate::pipeline::{LoadOptions, Session};
use crate::report::{display_dataset, display_ranking, export_results};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_error, print_info,
    print_success, print_warning,
};

use super::prompts::{
    confirm_step, prompt_column_key, prompt_load_options, prompt_path, prompt_row_index,
    prompt_threshold,
};

/// Menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenFile,
    SelectTarget,
    DropRow,
    DropColumn,
    ComputeFdr,
    ComputePearson,
    ComputeCrossCorrelation,
    ShowDataset,
    ShowResults,
    Export,
    Reset,
    Quit,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::OpenFile,
        Action::SelectTarget,
        Action::DropRow,
        Action::DropColumn,
        Action::ComputeFdr,
        Action::ComputePearson,
        Action::ComputeCrossCorrelation,
        Action::ShowDataset,
        Action::ShowResults,
        Action::Export,
        Action::Reset,
        Action::Quit,
    ];

    /// Whether the action needs a loaded dataset
    pub fn needs_dataset(self) -> bool {
        !matches!(
            self,
            Action::OpenFile | Action::Reset | Action::Quit | Action::ShowResults
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::OpenFile => "Open file",
            Action::SelectTarget => "Select target column",
            Action::DropRow => "Drop row",
            Action::DropColumn => "Drop column",
            Action::ComputeFdr => "Compute FDR",
            Action::ComputePearson => "Compute Pearson redundancy",
            Action::ComputeCrossCorrelation => "Compute cross-correlation",
            Action::ShowDataset => "Show dataset",
            Action::ShowResults => "Show results",
            Action::Export => "Export results (JSON)",
            Action::Reset => "Reset session",
            Action::Quit => "Quit",
        };
        write!(f, "{}", label)
    }
}

/// State carried across menu iterations besides the session itself
#[derive(Debug, Clone)]
pub struct InteractiveSettings {
    pub load_options: LoadOptions,
    pub threshold: f64,
    pub preview_rows: usize,
}

/// Run the menu loop until the user quits.
pub fn run_interactive(session: &mut Session, settings: &mut InteractiveSettings) -> Result<()> {
    let items: Vec<String> = Action::ALL.iter().map(|a| a.to_string()).collect();
    let mut default = 0;

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&items)
            .default(default)
            .interact()?;
        default = choice;
        let action = Action::ALL[choice];

        if action == Action::Quit {
            return Ok(());
        }
        if action.needs_dataset() && session.dataset().is_empty() {
            print_warning("No dataset loaded. Open a file first.");
            continue;
        }

        perform(action, session, settings)?;
    }
}

/// Carry out one action. Only prompt I/O errors propagate.
fn perform(
    action: Action,
    session: &mut Session,
    settings: &mut InteractiveSettings,
) -> Result<()> {
    match action {
        Action::OpenFile => {
            let Some(path) = prompt_path("File to open")? else {
                return Ok(());
            };
            let options = prompt_load_options(&settings.load_options)?;
            match session.load_file(&path, &options) {
                Ok(()) => {
                    settings.load_options = options;
                    print_success(&format!("Loaded {}", path.display()));
                    display_dataset(session.dataset(), settings.preview_rows);
                }
                Err(e) => print_error(&format!("Could not open the file: {}", e)),
            }
        }
        Action::SelectTarget => {
            let Some(key) = prompt_column_key("Target column (name or index)")? else {
                return Ok(());
            };
            match session.select_target(&key) {
                Ok(()) => {
                    print_success(&format!("Target set to '{}'", key));
                    display_dataset(session.dataset(), settings.preview_rows);
                }
                Err(e) => print_error(&e.to_string()),
            }
        }
        Action::DropRow => {
            let Some(index) = prompt_row_index("Row index to drop")? else {
                return Ok(());
            };
            match session.drop_row(index) {
                Ok(()) => {
                    print_success(&format!("Dropped row {}", index));
                    display_dataset(session.dataset(), settings.preview_rows);
                }
                Err(e) => print_error(&e.to_string()),
            }
        }
        Action::DropColumn => {
            let Some(key) = prompt_column_key("Column to drop (name or index)")? else {
                return Ok(());
            };
            match session.drop_column(&key) {
                Ok(()) => {
                    print_success(&format!("Dropped column '{}'", key));
                    display_dataset(session.dataset(), settings.preview_rows);
                }
                Err(e) => print_error(&e.to_string()),
            }
        }
        Action::ComputeFdr => {
            let spinner = create_spinner("Computing Fisher discriminant ratio...");
            match session.compute_fdr() {
                Ok(result) => {
                    finish_with_success(&spinner, "FDR computed");
                    display_ranking("FISHER DISCRIMINANT RATIO", "FDR", result);
                }
                Err(e) => {
                    finish_with_warning(&spinner, "FDR failed");
                    print_error(&e.to_string());
                }
            }
        }
        Action::ComputePearson => {
            let threshold = prompt_threshold(settings.threshold)?;
            settings.threshold = threshold;
            let spinner = create_spinner("Computing Pearson correlations...");
            match session.compute_pearson_redundancy(threshold) {
                Ok(result) => {
                    finish_with_success(&spinner, "Pearson redundancy computed");
                    display_ranking(
                        &format!("PEARSON REDUNDANCY (|r| >= {})", threshold),
                        "Pearson",
                        result,
                    );
                }
                Err(e) => {
                    finish_with_warning(&spinner, "Pearson redundancy failed");
                    print_error(&e.to_string());
                }
            }
        }
        Action::ComputeCrossCorrelation => {
            let spinner = create_spinner("Computing cross-correlation...");
            match session.compute_cross_correlation() {
                Ok(result) => {
                    finish_with_success(&spinner, "Cross-correlation computed");
                    display_ranking("CROSS-CORRELATION", "Cross-correlation", result);
                }
                Err(e) => {
                    finish_with_warning(&spinner, "Cross-correlation failed");
                    print_error(&e.to_string());
                }
            }
        }
        Action::ShowDataset => display_dataset(session.dataset(), settings.preview_rows),
        Action::ShowResults => show_results(session),
        Action::Export => {
            let Some(path) = prompt_path("Export to (JSON path)")? else {
                return Ok(());
            };
            match export_results(session, &path) {
                Ok(()) => print_success(&format!("Results written to {}", path.display())),
                Err(e) => print_error(&format!("{:#}", e)),
            }
        }
        Action::Reset => {
            if confirm_step("Discard the dataset and all results?")? {
                session.reset();
                print_success("Session reset");
            }
        }
        Action::Quit => {}
    }
    Ok(())
}

/// Print every result that still matches the current dataset.
pub fn show_results(session: &Session) {
    let mut shown = false;

    if let Some(result) = session.fdr() {
        display_ranking("FISHER DISCRIMINANT RATIO", "FDR", result);
        shown = true;
    }
    if let Some(result) = session.pearson() {
        display_ranking(
            &format!("PEARSON REDUNDANCY (|r| >= {})", result.threshold),
            "Pearson",
            result,
        );
        shown = true;
    }
    if let Some(result) = session.cross_correlation() {
        display_ranking("CROSS-CORRELATION", "Cross-correlation", result);
        shown = true;
    }

    if !shown {
        print_info("No up-to-date results. Compute a statistic first.");
    }
}
