//! Relocation of entries into category directories.
//!
//! This module drives a sorting run: it ensures the category directories,
//! snapshots the tree, renames every entry to its normalized name, moves or
//! unpacks files into their category and finally removes the directories left
//! empty.
//!
//! A run is not atomic. Interrupting it leaves the tree partially sorted: some
//! entries moved and others not, an archive unpacked but not yet deleted, or a
//! file renamed but not yet moved. Running again picks up whatever is left
//! outside the category directories.

use crate::archive::{ArchiveUnpacker, Unpacker};
use crate::cleanup;
use crate::error::{Result, SortError};
use crate::file_category::Category;
use crate::normalizer::{normalize_dir_name, normalized_path, split_extension};
use crate::walker::{ProtectedDirs, walk_entries};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// A recoverable condition reported during a run.
///
/// None of these stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// A rename or move target was already occupied.
    Collision { path: PathBuf, target: PathBuf },
    /// An archive could not be unpacked and was moved as a plain file instead.
    UnpackFailed { archive: PathBuf, reason: String },
    /// An archive was unpacked but could not be deleted afterwards.
    ArchiveNotRemoved { archive: PathBuf, reason: String },
    /// A directory could not be inspected or removed during cleanup.
    CleanupFailed { path: PathBuf, reason: String },
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collision { path, target } => write!(
                f,
                "Cannot move {}: {} already exists",
                path.display(),
                target.display()
            ),
            Self::UnpackFailed { archive, reason } => {
                write!(f, "Could not unpack {}: {}", archive.display(), reason)
            }
            Self::ArchiveNotRemoved { archive, reason } => write!(
                f,
                "Unpacked {} but could not delete it: {}",
                archive.display(),
                reason
            ),
            Self::CleanupFailed { path, reason } => {
                write!(f, "Could not clean up {}: {}", path.display(), reason)
            }
        }
    }
}

/// The result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    /// Final destinations per category, in processing order.
    pub files: BTreeMap<Category, Vec<PathBuf>>,
    /// Extensions seen on files of the five known categories.
    pub known_extensions: BTreeSet<String>,
    /// Extensions seen on files that ended up in `unknown_file`.
    pub unknown_extensions: BTreeSet<String>,
    /// Recoverable conditions, in the order they happened.
    pub issues: Vec<Issue>,
}

impl SortReport {
    fn new() -> Self {
        Self {
            files: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
            known_extensions: BTreeSet::new(),
            unknown_extensions: BTreeSet::new(),
            issues: Vec::new(),
        }
    }

    /// Destinations recorded for `category`.
    pub fn files_in(&self, category: Category) -> &[PathBuf] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of relocated files and unpacked archives.
    pub fn total_files(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    fn record_extension(&mut self, category: Category, ext: &str) {
        if category.is_known() {
            self.known_extensions.insert(ext.to_string());
        } else {
            self.unknown_extensions.insert(ext.to_string());
        }
    }

    fn push_issue(&mut self, issue: Issue) {
        log::warn!("{}", issue);
        self.issues.push(issue);
    }
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum SortOutcome {
    /// Entries were processed.
    Sorted(SortReport),
    /// Nothing was found under the root outside the category directories.
    EmptyDirectory,
}

/// Sorts a directory tree into category directories.
///
/// The unpacker defaults to [`ArchiveUnpacker`]; tests and callers may swap it
/// with [`FileOrganizer::with_unpacker`].
pub struct FileOrganizer<U = ArchiveUnpacker> {
    root: PathBuf,
    protected: ProtectedDirs,
    unpacker: U,
}

impl FileOrganizer<ArchiveUnpacker> {
    /// Creates an organizer for `root` with the default archive unpacker.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            protected: ProtectedDirs::new(root),
            unpacker: ArchiveUnpacker,
        }
    }
}

impl<U: Unpacker> FileOrganizer<U> {
    /// Replaces the archive unpacker.
    pub fn with_unpacker<V: Unpacker>(self, unpacker: V) -> FileOrganizer<V> {
        FileOrganizer {
            root: self.root,
            protected: self.protected,
            unpacker,
        }
    }

    /// Runs the whole pipeline once.
    ///
    /// # Errors
    ///
    /// Returns a [`SortError`] for unexpected failures only: a root that is not
    /// a directory, a category directory that cannot be created, an unreadable
    /// tree, or a rename that fails for a reason other than a collision.
    /// Collisions, unpack failures and cleanup failures are recorded in the
    /// report instead.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sortdir::file_organizer::{FileOrganizer, SortOutcome};
    /// use std::path::Path;
    ///
    /// match FileOrganizer::new(Path::new("/path/to/downloads")).sort() {
    ///     Ok(SortOutcome::Sorted(report)) => println!("Sorted {} files", report.total_files()),
    ///     Ok(SortOutcome::EmptyDirectory) => println!("Nothing to sort"),
    ///     Err(e) => eprintln!("Sorting failed: {}", e),
    /// }
    /// ```
    pub fn sort(&self) -> Result<SortOutcome> {
        if !self.root.is_dir() {
            return Err(SortError::InvalidRoot {
                path: self.root.clone(),
            });
        }

        self.protected.ensure()?;
        log::debug!("Category directories ready under {}", self.root.display());

        let entries = walk_entries(&self.root, &self.protected)?;
        if entries.is_empty() {
            log::info!("Directory {} is empty", self.root.display());
            return Ok(SortOutcome::EmptyDirectory);
        }
        log::info!(
            "Sorting {} entries under {}",
            entries.len(),
            self.root.display()
        );

        let mut report = SortReport::new();
        // Directory renames so far, outermost first.
        let mut renames: Vec<(PathBuf, PathBuf)> = Vec::new();

        for entry in &entries {
            let current = resolve(&entry.path, &renames);
            let normalized = self.rename_in_place(&current, entry.is_dir, &mut report)?;

            if entry.is_dir {
                if normalized != current {
                    renames.push((current, normalized));
                }
                continue;
            }

            self.relocate_file(&normalized, &mut report)?;
        }

        let cleanup_issues = cleanup::remove_empty_dirs(&self.root, &self.protected);
        report.issues.extend(cleanup_issues);

        log::info!(
            "Sorted {} files with {} issues",
            report.total_files(),
            report.issues.len()
        );
        Ok(SortOutcome::Sorted(report))
    }

    /// Renames `current` to its normalized name, returning where it now lives.
    fn rename_in_place(
        &self,
        current: &Path,
        is_dir: bool,
        report: &mut SortReport,
    ) -> Result<PathBuf> {
        let target = normalized_path(current, is_dir);
        if target == current {
            return Ok(target);
        }
        if occupied(&target) {
            report.push_issue(Issue::Collision {
                path: current.to_path_buf(),
                target,
            });
            return Ok(current.to_path_buf());
        }

        fs::rename(current, &target).map_err(|e| SortError::Rename {
            from: current.to_path_buf(),
            to: target.clone(),
            source: e,
        })?;
        log::debug!("Renamed {} -> {}", current.display(), target.display());
        Ok(target)
    }

    /// Classifies a file and moves or unpacks it into its category.
    fn relocate_file(&self, path: &Path, report: &mut SortReport) -> Result<()> {
        let Some(file_name) = path.file_name() else {
            return Ok(());
        };
        // Classification only; the target keeps the exact on-disk name.
        let name = file_name.to_string_lossy();
        let (stem, ext) = split_extension(&name);
        let category = Category::from_extension(ext);

        let destination = match category {
            Category::Archives => self.unpack_or_move(path, file_name, stem, report)?,
            _ => {
                let target = self.protected.dir_for(category).join(file_name);
                move_into(path, &target, report)?.then_some(target)
            }
        };

        if let Some(destination) = destination {
            report
                .files
                .entry(category)
                .or_default()
                .push(destination);
        }
        report.record_extension(category, ext);
        Ok(())
    }

    /// Unpacks an archive into `archives/<stem>/`, or moves it there on failure.
    ///
    /// The stem is normalized again so that a name kept after a collision
    /// (such as `...zip`) cannot point outside `archives/`.
    ///
    /// Returns the unpack directory, the moved archive path, or `None` after a
    /// collision.
    fn unpack_or_move(
        &self,
        archive: &Path,
        name: &OsStr,
        stem: &str,
        report: &mut SortReport,
    ) -> Result<Option<PathBuf>> {
        let target_dir = self
            .protected
            .dir_for(Category::Archives)
            .join(normalize_dir_name(stem));
        if !target_dir.is_dir() {
            fs::create_dir_all(&target_dir).map_err(|e| SortError::DirectoryCreation {
                path: target_dir.clone(),
                source: e,
            })?;
        }

        match self.unpacker.unpack(archive, &target_dir) {
            Ok(()) => {
                log::debug!(
                    "Unpacked {} into {}",
                    archive.display(),
                    target_dir.display()
                );
                if let Err(e) = fs::remove_file(archive) {
                    report.push_issue(Issue::ArchiveNotRemoved {
                        archive: archive.to_path_buf(),
                        reason: e.to_string(),
                    });
                    if occupied(archive) {
                        move_into(archive, &target_dir.join(name), report)?;
                    }
                }
                Ok(Some(target_dir))
            }
            Err(e) => {
                report.push_issue(Issue::UnpackFailed {
                    archive: archive.to_path_buf(),
                    reason: e.to_string(),
                });
                let target = target_dir.join(name);
                Ok(move_into(archive, &target, report)?.then_some(target))
            }
        }
    }
}

/// Sorts `root` with the default configuration.
pub fn sort_files(root: &Path) -> Result<SortOutcome> {
    FileOrganizer::new(root).sort()
}

/// Moves `source` to `target` unless the target is occupied.
///
/// Returns whether the move happened.
fn move_into(source: &Path, target: &Path, report: &mut SortReport) -> Result<bool> {
    if occupied(target) {
        report.push_issue(Issue::Collision {
            path: source.to_path_buf(),
            target: target.to_path_buf(),
        });
        return Ok(false);
    }

    fs::rename(source, target).map_err(|e| SortError::Rename {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    })?;
    log::debug!("Moved {} -> {}", source.display(), target.display());
    Ok(true)
}

/// True if anything, including a dangling symlink, exists at `path`.
fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Maps a snapshot path to its current location through earlier directory renames.
fn resolve(path: &Path, renames: &[(PathBuf, PathBuf)]) -> PathBuf {
    let mut current = path.to_path_buf();
    for (from, to) in renames {
        if let Ok(rest) = current.strip_prefix(from) {
            current = if rest.as_os_str().is_empty() {
                to.clone()
            } else {
                to.join(rest)
            };
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::UnpackError;
    use tempfile::TempDir;

    struct FailingUnpacker;

    impl Unpacker for FailingUnpacker {
        fn unpack(&self, _archive: &Path, _dest: &Path) -> std::result::Result<(), UnpackError> {
            Err(UnpackError::UnsupportedFormat {
                extension: "test".to_string(),
            })
        }
    }

    /// Extracts a marker file, then deletes the archive itself.
    struct SelfCleaningUnpacker;

    impl Unpacker for SelfCleaningUnpacker {
        fn unpack(&self, archive: &Path, dest: &Path) -> std::result::Result<(), UnpackError> {
            fs::write(dest.join("unpacked.txt"), b"x")?;
            fs::remove_file(archive)?;
            Ok(())
        }
    }

    fn sorted(outcome: SortOutcome) -> SortReport {
        match outcome {
            SortOutcome::Sorted(report) => report,
            SortOutcome::EmptyDirectory => panic!("expected a sorted outcome"),
        }
    }

    #[test]
    fn test_resolve_through_nested_renames() {
        let renames = vec![
            (PathBuf::from("/r/Папка"), PathBuf::from("/r/Papka")),
            (PathBuf::from("/r/Papka/Фото"), PathBuf::from("/r/Papka/Foto")),
        ];
        assert_eq!(
            resolve(Path::new("/r/Папка/Фото/x.jpg"), &renames),
            PathBuf::from("/r/Papka/Foto/x.jpg")
        );
        assert_eq!(
            resolve(Path::new("/r/other/y.jpg"), &renames),
            PathBuf::from("/r/other/y.jpg")
        );
        assert_eq!(
            resolve(Path::new("/r/Папка"), &renames),
            PathBuf::from("/r/Papka")
        );
    }

    #[test]
    fn test_moves_file_into_category() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("song.mp3"), b"x").unwrap();

        let report = sorted(sort_files(base_path).unwrap());

        let expected = base_path.join("audio").join("song.mp3");
        assert!(expected.is_file());
        assert_eq!(report.files_in(Category::Audio), &[expected]);
        assert!(report.known_extensions.contains(".mp3"));
        assert!(report.unknown_extensions.is_empty());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_collision_leaves_file_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::create_dir(base_path.join("images")).unwrap();
        fs::write(base_path.join("images").join("pic.png"), b"old").unwrap();
        fs::create_dir(base_path.join("sub")).unwrap();
        fs::write(base_path.join("sub").join("pic.png"), b"new").unwrap();

        let report = sorted(sort_files(base_path).unwrap());

        assert_eq!(
            fs::read(base_path.join("images").join("pic.png")).unwrap(),
            b"old"
        );
        assert!(base_path.join("sub").join("pic.png").is_file());
        assert!(report.files_in(Category::Images).is_empty());
        assert!(report.known_extensions.contains(".png"));
        assert!(matches!(report.issues[..], [Issue::Collision { .. }]));
    }

    #[test]
    fn test_rename_collision_keeps_original_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("a b.xyz"), b"space").unwrap();
        fs::write(base_path.join("a_b.xyz"), b"underscore").unwrap();

        let report = sorted(sort_files(base_path).unwrap());

        let unknown = base_path.join("unknown_file");
        assert_eq!(fs::read(unknown.join("a b.xyz")).unwrap(), b"space");
        assert_eq!(fs::read(unknown.join("a_b.xyz")).unwrap(), b"underscore");
        assert_eq!(report.files_in(Category::UnknownFile).len(), 2);
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_unpack_failure_moves_archive() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("data.zip"), b"zip").unwrap();

        let organizer = FileOrganizer::new(base_path).with_unpacker(FailingUnpacker);
        let report = sorted(organizer.sort().unwrap());

        let moved = base_path.join("archives").join("data").join("data.zip");
        assert!(moved.is_file());
        assert_eq!(report.files_in(Category::Archives), &[moved]);
        assert!(matches!(report.issues[..], [Issue::UnpackFailed { .. }]));
    }

    #[test]
    fn test_invalid_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");

        let result = sort_files(&missing);
        assert!(matches!(result, Err(SortError::InvalidRoot { .. })));
        assert!(!missing.exists());
    }

    #[test]
    fn test_empty_directory_outcome() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let outcome = sort_files(temp_dir.path()).unwrap();
        assert!(matches!(outcome, SortOutcome::EmptyDirectory));
    }

    #[test]
    fn test_failed_archive_delete_does_not_stop_the_run() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("a.zip"), b"zip").unwrap();
        fs::write(base_path.join("b.mp3"), b"mp3").unwrap();

        let organizer = FileOrganizer::new(base_path).with_unpacker(SelfCleaningUnpacker);
        let report = sorted(organizer.sort().unwrap());

        let unpacked = base_path.join("archives").join("a");
        assert!(unpacked.join("unpacked.txt").is_file());
        assert!(base_path.join("audio").join("b.mp3").is_file());
        assert!(!base_path.join("b.mp3").exists());
        assert_eq!(report.files_in(Category::Archives), &[unpacked]);
        assert!(matches!(
            report.issues[..],
            [Issue::ArchiveNotRemoved { .. }]
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_moved_byte_for_byte() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        // Both directories keep their names, so `bad_.xyz` blocks the rename below.
        fs::create_dir(base_path.join("bad_.xyz")).unwrap();
        fs::create_dir(base_path.join("bad__xyz")).unwrap();
        let raw_name = OsStr::from_bytes(b"bad\xff.xyz");
        fs::write(base_path.join(raw_name), b"raw").unwrap();

        let report = sorted(sort_files(base_path).unwrap());

        let expected = base_path.join("unknown_file").join(raw_name);
        assert_eq!(fs::read(&expected).unwrap(), b"raw");
        assert_eq!(report.files_in(Category::UnknownFile), &[expected]);
        assert_eq!(report.issues.len(), 2);
        assert!(
            report
                .issues
                .iter()
                .all(|issue| matches!(issue, Issue::Collision { .. }))
        );
    }
}
