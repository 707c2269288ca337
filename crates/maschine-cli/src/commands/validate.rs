//! Validate command implementation
//!
//! Validates a metadata JSON file and reports every violation.

use anyhow::Result;
use colored::Colorize;
use maschine_meta::validate_metadata;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    meta_error_to_json, print_json, validation_error_to_json, JsonError, ValidateOutput,
};
use super::metadata::load_metadata_value;
use super::reporting::print_error;

/// Run the validate command
///
/// # Arguments
/// * `metadata_path` - Path to the metadata JSON file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(metadata_path: &str, json_output: bool) -> Result<ExitCode> {
    let errors = check(metadata_path);

    if json_output {
        print_json(&ValidateOutput {
            success: errors.is_empty(),
            metadata: metadata_path.to_string(),
            errors: errors.clone(),
        })?;
    } else {
        println!("{} {}", "Validating:".cyan().bold(), metadata_path);
        for error in &errors {
            print_error(error);
        }
        if errors.is_empty() {
            println!("\n{} Metadata is valid", "SUCCESS".green().bold());
        } else {
            println!(
                "\n{} Metadata has {} error(s)",
                "FAILED".red().bold(),
                errors.len()
            );
        }
    }

    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Loads and validates a metadata file, returning every error found.
pub fn check(metadata_path: &str) -> Vec<JsonError> {
    match load_metadata_value(Path::new(metadata_path)) {
        Ok(value) => validate_metadata(&value)
            .errors
            .iter()
            .map(validation_error_to_json)
            .collect(),
        Err(e) => meta_error_to_json(&e)
            .into_iter()
            .map(|err| err.with_file(metadata_path))
            .collect(),
    }
}
