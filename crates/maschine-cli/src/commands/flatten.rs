//! Flatten command implementation
//!
//! Prints the escaped category paths written into the NISound record for a
//! set of modes and type paths.

use anyhow::Result;
use colored::Colorize;
use maschine_codec::flatten_categories;
use maschine_meta::CategoryPath;
use std::process::ExitCode;

use super::json_output::{print_json, validation_error_to_json, FlattenOutput, JsonError};
use super::reporting::print_error;

/// Separator between segments of a type path argument.
pub const SEGMENT_SEPARATOR: char = '/';

/// Run the flatten command
///
/// # Arguments
/// * `modes` - Mode names
/// * `types` - Type paths, segments separated by `/`
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every type path is valid, 1 otherwise
pub fn run(modes: &[String], types: &[String], json_output: bool) -> Result<ExitCode> {
    let (paths, errors) = parse_type_paths(types);
    let categories = if errors.is_empty() {
        flatten_categories(modes, &paths)
    } else {
        Vec::new()
    };

    if json_output {
        print_json(&FlattenOutput {
            success: errors.is_empty(),
            categories,
            errors: errors.clone(),
        })?;
    } else if errors.is_empty() {
        for category in &categories {
            println!("{}", category);
        }
    } else {
        for error in &errors {
            print_error(error);
        }
        println!("\n{} Invalid type path(s)", "FAILED".red().bold());
    }

    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Parses `a/b/c` arguments into category paths.
pub fn parse_type_paths(types: &[String]) -> (Vec<CategoryPath>, Vec<JsonError>) {
    let mut paths = Vec::with_capacity(types.len());
    let mut errors = Vec::new();
    for (i, raw) in types.iter().enumerate() {
        match CategoryPath::new(raw.split(SEGMENT_SEPARATOR)) {
            Ok(path) => paths.push(path),
            Err(e) => {
                let mut error = validation_error_to_json(&e);
                error.path = Some(format!("types[{}]", i));
                errors.push(error);
            }
        }
    }
    (paths, errors)
}
