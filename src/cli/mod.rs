//! CLI module - argument parsing, prompts and the interactive session

mod args;
pub mod batch;
pub mod interactive;
mod prompts;

pub use args::{parse_delimiter, Cli, NonNumericArg};
pub use batch::run_batch;
pub use interactive::{run_interactive, show_results, Action, InteractiveSettings};
pub use prompts::*;
