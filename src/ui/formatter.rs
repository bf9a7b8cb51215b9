//! Pure formatting functions for UI output.
//!
//! Each `format_*` function builds the line; the matching `display_*`
//! function prints it. Inside GitHub Actions warnings and errors use the
//! workflow command syntax so they show up as annotations.

use console::style;

use crate::boundary::BoundaryWarning;

/// Error line, `::error::` in CI
pub fn format_error(message: &str, ci: bool) -> String {
    if ci {
        format!("::error::{}", escape_data(message))
    } else {
        format!("{} {}", style("ERROR:").red().bold(), message)
    }
}

/// Warning line, `::warning::` in CI
pub fn format_warning(message: &str, ci: bool) -> String {
    if ci {
        format!("::warning::{}", escape_data(message))
    } else {
        format!("{} {}", style("WARNING:").yellow().bold(), message)
    }
}

pub fn format_status(message: &str, ci: bool) -> String {
    if ci {
        message.to_string()
    } else {
        format!("{} {}", style("→").yellow(), message)
    }
}

pub fn format_success(message: &str, ci: bool) -> String {
    if ci {
        message.to_string()
    } else {
        format!("{} {}", style("✓").green(), message)
    }
}

/// `Generated:  t1 t2 ...`
pub fn format_generated(tags: &[String]) -> String {
    format!("Generated:  {}", tags.join(" "))
}

/// Workflow command data must not contain raw `%`, CR or LF
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format and print an error message.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message, super::is_github_actions()));
}

/// Format and print a warning message.
pub fn display_warning(message: &str) {
    println!("{}", format_warning(message, super::is_github_actions()));
}

/// Format and print a status message.
pub fn display_status(message: &str) {
    println!("{}", format_status(message, super::is_github_actions()));
}

/// Format and print a success message.
pub fn display_success(message: &str) {
    println!("{}", format_success(message, super::is_github_actions()));
}

/// Display the generated tags on one line.
pub fn display_generated(tags: &[String]) {
    display_success(&format_generated(tags));
}

/// Display a boundary warning, as a warning or as info depending on its kind.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    if warning.is_warning() {
        display_warning(&warning.to_string());
    } else {
        display_status(&warning.to_string());
    }
}
