//! Archive extraction.
//!
//! The relocator only needs "unpack this file into that directory"; the
//! [`Unpacker`] trait is that seam. [`ArchiveUnpacker`] handles the archive
//! extensions of the category table: `.zip`, `.tar` and `.gz` (read as a
//! gzip-compressed tarball).

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while unpacking an archive.
#[derive(Error, Debug)]
pub enum UnpackError {
    /// The extension is not an archive format we can read.
    #[error("unsupported archive format: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// Reading the archive or writing its contents failed.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// The zip container is malformed or uses an unsupported feature.
    #[error("zip error: {source}")]
    Zip {
        #[from]
        source: zip::result::ZipError,
    },
}

/// Known archive containers, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveKind {
    /// Maps an extension (with its dot) to an archive kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".zip" => Some(ArchiveKind::Zip),
            ".tar" => Some(ArchiveKind::Tar),
            ".gz" => Some(ArchiveKind::TarGz),
            _ => None,
        }
    }
}

/// Extracts an archive into a destination directory.
pub trait Unpacker {
    /// Unpacks `archive` into `dest`, which already exists.
    ///
    /// On error, `dest` may hold a partial extraction.
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<(), UnpackError>;
}

/// Default unpacker backed by the `zip`, `tar` and `flate2` crates.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveUnpacker;

impl Unpacker for ArchiveUnpacker {
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<(), UnpackError> {
        let extension = archive
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let kind = ArchiveKind::from_extension(&extension)
            .ok_or(UnpackError::UnsupportedFormat { extension })?;

        fs::create_dir_all(dest)?;
        let file = File::open(archive)?;

        match kind {
            ArchiveKind::Zip => {
                let mut zip = zip::ZipArchive::new(file)?;
                zip.extract(dest)?;
            }
            ArchiveKind::Tar => {
                tar::Archive::new(file).unpack(dest)?;
            }
            ArchiveKind::TarGz => {
                tar::Archive::new(GzDecoder::new(file)).unpack(dest)?;
            }
        }
        Ok(())
    }
}
