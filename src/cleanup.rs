//! Removal of directories left empty by a run.

use crate::file_organizer::Issue;
use crate::walker::ProtectedDirs;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Removes every empty directory under `root`, deepest first.
///
/// The root and the category directories are never removed, and the walk does
/// not enter the category directories. A directory whose last child was just
/// removed is itself removed. Failures are logged and returned, never raised.
pub fn remove_empty_dirs(root: &Path, protected: &ProtectedDirs) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut dirs: Vec<PathBuf> = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !protected.contains(e.path()));

    for item in walker {
        match item {
            Ok(entry) if entry.file_type().is_dir() => dirs.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => issues.push(failure(
                e.path().unwrap_or(root).to_path_buf(),
                e.to_string(),
            )),
        }
    }

    // Pre-order reversed: children come before their parents.
    dirs.reverse();
    let (removed, failures) = remove_if_empty(&dirs);
    issues.extend(failures);

    log::info!("Removed {} empty directories", removed);
    issues
}

/// Removes each directory of `dirs` that is empty when its turn comes.
///
/// Returns how many were removed and the failures, in order.
fn remove_if_empty(dirs: &[PathBuf]) -> (usize, Vec<Issue>) {
    let mut removed = 0usize;
    let mut issues = Vec::new();
    for dir in dirs {
        match is_empty(dir) {
            Ok(true) => match fs::remove_dir(dir) {
                Ok(()) => {
                    log::debug!("Removed empty directory {}", dir.display());
                    removed += 1;
                }
                Err(e) => issues.push(failure(dir.clone(), e.to_string())),
            },
            Ok(false) => {}
            Err(e) => issues.push(failure(dir.clone(), e.to_string())),
        }
    }
    (removed, issues)
}

fn is_empty(dir: &Path) -> std::io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

fn failure(path: PathBuf, reason: String) -> Issue {
    let issue = Issue::CleanupFailed { path, reason };
    log::warn!("{}", issue);
    issue
}
