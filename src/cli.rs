//! Command-line interface module for sortdir.
//!
//! This module handles all CLI-related functionality:
//! - Argument parsing (a single positional directory)
//! - Logger setup
//! - Running the sort and rendering its outcome

use crate::error::SortError;
use crate::file_organizer::{FileOrganizer, SortOutcome};
use crate::output::OutputFormatter;
use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

/// Level of the diagnostics printed while sorting.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Sort a directory into images, document, audio, video, archives and unknown_file.
#[derive(Debug, Parser)]
#[command(name = "sortdir", version, about)]
pub struct Cli {
    /// Directory to sort in place.
    pub directory: PathBuf,
}

/// Installs the terminal logger on standard output.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logging() {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    if TermLogger::init(LOG_LEVEL, config, TerminalMode::Stdout, ColorChoice::Auto).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Sorts `dir_path` and prints the outcome.
///
/// # Examples
///
/// ```no_run
/// use sortdir::cli::run_cli;
/// use std::path::Path;
///
/// if let Err(e) = run_cli(Path::new("/path/to/directory")) {
///     println!("Error: {}", e);
/// }
/// ```
pub fn run_cli(dir_path: &Path) -> Result<(), SortError> {
    OutputFormatter::info(&format!("Sorting contents of: {}", dir_path.display()));

    match FileOrganizer::new(dir_path).sort()? {
        SortOutcome::EmptyDirectory => {
            OutputFormatter::warning(&format!("Directory {} is empty", dir_path.display()));
        }
        SortOutcome::Sorted(report) => {
            OutputFormatter::summary(&report);
            OutputFormatter::success("Sorting complete!");
        }
    }
    Ok(())
}
