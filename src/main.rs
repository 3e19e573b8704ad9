//! featstat: feature ranking CLI
//!
//! Loads a delimited dataset, lets the user pick a target column and prune
//! rows and columns, then ranks features by Fisher discriminant ratio,
//! Pearson redundancy and aggregate cross-correlation.

use anyhow::Result;
use clap::Parser;

use featstat::cli::{run_batch, run_interactive, Cli, InteractiveSettings};
use featstat::pipeline::{ColumnKey, Session};
use featstat::report::display_dataset;
use featstat::utils::{print_banner, print_error, print_success};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut session = Session::new(cli.statistics_config());

    print_banner(env!("CARGO_PKG_VERSION"));

    if cli.batch {
        return run_batch(&cli, &mut session);
    }

    // Preload whatever was given on the command line, then hand over to the menu
    if let Some(input) = &cli.input {
        match session.load_file(input, &cli.load_options()) {
            Ok(()) => {
                print_success(&format!("Loaded {}", input.display()));
                if let Some(target) = &cli.target {
                    if let Err(e) = session.select_target(&ColumnKey::parse(target)) {
                        print_error(&e.to_string());
                    }
                }
                display_dataset(session.dataset(), cli.preview_rows);
            }
            Err(e) => print_error(&format!("Could not open the file: {}", e)),
        }
    }

    let mut settings = InteractiveSettings {
        load_options: cli.load_options(),
        threshold: cli.threshold,
        preview_rows: cli.preview_rows,
    };
    run_interactive(&mut session, &mut settings)
}
