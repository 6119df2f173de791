//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use fscpy_copy::CopySummary;

/// Print that a path is now remembered.
pub fn print_remembered(path: &Path) {
    println!("{} {}", "Copied:".green().bold(), path.display());
}

/// Print the remembered path, if any.
pub fn print_clipboard(path: Option<&Path>) {
    match path {
        Some(path) => println!("{}", path.display().to_string().cyan()),
        None => println!("{}", "Nothing remembered.".dimmed()),
    }
}

/// Print that the remembered path was cleared.
pub fn print_forgotten() {
    println!("{}", "Clipboard cleared.".dimmed());
}

/// Print totals after a paste.
pub fn print_summary(from: &Path, to: &Path, summary: &CopySummary, elapsed: Duration) {
    println!(
        "{} {} -> {}",
        "Pasted:".green().bold(),
        from.display(),
        to.display()
    );
    println!(
        "  {} file{}, {} bytes, {} director{} in {:.2?}",
        summary.files_copied,
        if summary.files_copied == 1 { "" } else { "s" },
        summary.bytes_copied,
        summary.directories_created,
        if summary.directories_created == 1 { "y" } else { "ies" },
        elapsed
    );
    if summary.files_skipped > 0 {
        println!(
            "  {} {} skipped",
            "•".dimmed(),
            summary.files_skipped.to_string().dimmed()
        );
    }
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}
