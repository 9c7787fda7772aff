//! Tree walking with protected category directories.
//!
//! The walk produces an immutable snapshot of every entry under the root in
//! pre-order. The category directories are never listed nor entered, so files
//! already sorted are not processed again.

use crate::error::{Result, SortError};
use crate::file_category::Category;
use crate::normalizer::split_extension;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file or directory discovered under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path at scan time.
    pub path: PathBuf,
    /// Whether the entry was a directory at scan time.
    pub is_dir: bool,
}

impl Entry {
    /// Base name of the entry.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension including its dot, or empty. Always empty for directories.
    pub fn extension(&self) -> String {
        if self.is_dir {
            return String::new();
        }
        split_extension(&self.name()).1.to_string()
    }

    /// Parent directory of the entry.
    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// The six category roots under a sorting root.
#[derive(Debug, Clone)]
pub struct ProtectedDirs {
    root: PathBuf,
    dirs: HashSet<PathBuf>,
}

impl ProtectedDirs {
    /// Computes the category roots for `root`. Nothing is created yet.
    pub fn new(root: &Path) -> Self {
        let dirs = Category::ALL
            .iter()
            .map(|category| root.join(category.dir_name()))
            .collect();
        Self {
            root: root.to_path_buf(),
            dirs,
        }
    }

    /// Path of the directory owned by `category`.
    pub fn dir_for(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Returns true if `path` is one of the category roots.
    pub fn contains(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    /// Iterates over the category roots in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    /// Creates every category directory that does not exist yet.
    pub fn ensure(&self) -> Result<()> {
        for category in Category::ALL {
            let dir = self.dir_for(category);
            if !dir.is_dir() {
                fs::create_dir_all(&dir).map_err(|e| SortError::DirectoryCreation {
                    path: dir.clone(),
                    source: e,
                })?;
                log::debug!("Created category directory {}", dir.display());
            }
        }
        Ok(())
    }
}

/// Lists every entry under `root` in pre-order, skipping protected subtrees.
///
/// The root itself is not part of the result. Siblings are ordered by file
/// name. Symbolic links are listed but never followed.
pub fn walk_entries(root: &Path, protected: &ProtectedDirs) -> Result<Vec<Entry>> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !protected.contains(e.path()));

    let mut entries = Vec::new();
    for item in walker {
        let item = item.map_err(|e| SortError::Walk {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source: e,
        })?;
        entries.push(Entry {
            path: item.path().to_path_buf(),
            is_dir: item.file_type().is_dir(),
        });
    }
    Ok(entries)
}
