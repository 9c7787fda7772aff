//! Output formatting and styling module.
//!
//! Provides the centralized interface for CLI output: colored status lines and
//! the end-of-run summary. Everything goes to standard output.

use crate::file_category::Category;
use crate::file_organizer::SortReport;
use colored::*;
use std::collections::BTreeSet;

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - The per-category summary table of a run
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    /// OutputFormatter::success("Directory sorted");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        println!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints the summary of a completed run.
    ///
    /// Shows one row per category with its file count, then the known and
    /// unknown extensions, then a count of reported issues.
    pub fn summary(report: &SortReport) {
        Self::header("SUMMARY");

        let width = Category::ALL
            .iter()
            .map(|c| c.dir_name().len())
            .max()
            .unwrap_or(0)
            .max(8); // At least "Category" width

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for category in Category::ALL {
            let count = report.files_in(category).len();
            println!(
                "{:<width$} | {} {}",
                category.dir_name(),
                count.to_string().green(),
                plural(count),
                width = width
            );
        }

        let total = report.total_files();
        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            plural(total),
            width = width
        );

        println!();
        println!(
            "Known extensions:   {}",
            join_extensions(&report.known_extensions)
        );
        println!(
            "Unknown extensions: {}",
            join_extensions(&report.unknown_extensions)
        );

        if !report.issues.is_empty() {
            Self::warning(&format!(
                "{} {} reported, see messages above",
                report.issues.len(),
                if report.issues.len() == 1 {
                    "issue"
                } else {
                    "issues"
                }
            ));
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

fn join_extensions(extensions: &BTreeSet<String>) -> String {
    if extensions.is_empty() {
        return "-".dimmed().to_string();
    }
    extensions
        .iter()
        .map(|ext| if ext.is_empty() { "(none)" } else { ext.as_str() })
        .collect::<Vec<_>>()
        .join(", ")
}
