//! Interactive prompts using dialoguer

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Confirm, Input};

use crate::pipeline::{ColumnKey, LoadOptions};

use super::args::parse_delimiter;

/// Ask for free text. Blank answers mean "cancel".
pub fn prompt_text(message: &str) -> Result<Option<String>> {
    let answer: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// Ask for a column by name or position
pub fn prompt_column_key(message: &str) -> Result<Option<ColumnKey>> {
    Ok(prompt_text(message)?.map(|token| ColumnKey::parse(&token)))
}

/// Ask for a zero-based row index. Blank answers mean "cancel".
pub fn prompt_row_index(message: &str) -> Result<Option<usize>> {
    let answer: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if input.trim().is_empty() || input.trim().parse::<usize>().is_ok() {
                Ok(())
            } else {
                Err("enter a non-negative whole number".to_string())
            }
        })
        .interact_text()?;
    Ok(answer.trim().parse().ok())
}

/// Ask for the Pearson threshold
pub fn prompt_threshold(default: f64) -> Result<f64> {
    let value: f64 = Input::new()
        .with_prompt("Pearson threshold")
        .default(default)
        .validate_with(|v: &f64| -> std::result::Result<(), String> {
            if v.is_finite() {
                Ok(())
            } else {
                Err("threshold must be a finite number".to_string())
            }
        })
        .interact_text()?;
    Ok(value)
}

/// Ask for a file path
pub fn prompt_path(message: &str) -> Result<Option<PathBuf>> {
    Ok(prompt_text(message)?.map(PathBuf::from))
}

/// Ask for the delimiter and header flag, starting from `defaults`
pub fn prompt_load_options(defaults: &LoadOptions) -> Result<LoadOptions> {
    let delimiter: String = Input::new()
        .with_prompt("Delimiter")
        .default((defaults.delimiter as char).to_string())
        .validate_with(|s: &String| parse_delimiter(s).map(|_| ()))
        .interact_text()?;
    let has_header = Confirm::new()
        .with_prompt("Does the file have a header row?")
        .default(defaults.has_header)
        .interact()?;

    Ok(LoadOptions {
        delimiter: parse_delimiter(&delimiter).map_err(anyhow::Error::msg)? as u8,
        has_header,
    })
}

/// Prompt user to confirm an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}
