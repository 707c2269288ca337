//! Shared human-readable reporting helpers.

use colored::Colorize;

use super::json_output::JsonError;

/// Prints one error line, indented under the item it belongs to.
pub(crate) fn print_error(error: &JsonError) {
    let path = error
        .path
        .as_ref()
        .map(|p| format!(" at {}", p))
        .unwrap_or_default();
    println!(
        "    {} [{}]{}: {}",
        "error".red(),
        error.code,
        path.dimmed(),
        error.message
    );
}

/// Prints one warning line.
pub(crate) fn print_warning(message: &str) {
    println!("  {} {}", "!".yellow(), message.yellow());
}
