//! Error types for sortdir.
//!
//! Only unexpected failures live here. Recoverable conditions (collisions,
//! unpack failures, cleanup failures) are reported as
//! [`Issue`](crate::file_organizer::Issue)s and never abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using sortdir's error type.
pub type Result<T> = std::result::Result<T, SortError>;

/// Errors that abort a sorting run.
#[derive(Error, Debug)]
pub enum SortError {
    /// The root path is missing or is not a directory.
    #[error("Invalid root directory {}: not an existing directory", path.display())]
    InvalidRoot { path: PathBuf },

    /// A category directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The tree walk could not read part of the tree.
    #[error("Failed to scan {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A rename or move failed for a reason other than a collision.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}
