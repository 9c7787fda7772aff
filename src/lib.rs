//! sortdir - sort a messy directory into category folders
//!
//! This library walks a directory tree, normalizes every name to
//! `[A-Za-z0-9_]` (Cyrillic letters are transliterated), moves files into
//! `images`, `document`, `audio`, `video`, `archives` or `unknown_file`
//! according to their extension, unpacks `.zip`, `.tar` and `.gz` archives
//! and removes the directories left empty.
//!
//! Runs are sequential and not atomic: an interrupted run leaves the tree
//! partially sorted, and running again continues from there.

pub mod archive;
pub mod cleanup;
pub mod cli;
pub mod error;
pub mod file_category;
pub mod file_organizer;
pub mod normalizer;
pub mod output;
pub mod walker;

pub use archive::{ArchiveUnpacker, UnpackError, Unpacker};
pub use error::{Result, SortError};
pub use file_category::Category;
pub use file_organizer::{FileOrganizer, Issue, SortOutcome, SortReport, sort_files};

pub use cli::run_cli;
