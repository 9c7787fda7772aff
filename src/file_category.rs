//! File categorization by extension.
//!
//! This module maps a file extension to one of six fixed categories. The table
//! is closed: anything not listed is an [`Category::UnknownFile`].
//!
//! Matching is case-sensitive and the extension includes its leading dot,
//! exactly as it appears on the file name.
//!
//! # Examples
//!
//! ```
//! use sortdir::file_category::Category;
//!
//! assert_eq!(Category::from_extension(".png"), Category::Images);
//! assert_eq!(Category::from_extension(".mp3"), Category::Audio);
//! assert_eq!(Category::from_extension(".PNG"), Category::UnknownFile);
//! ```

use serde::Serialize;

/// Represents one of the six destination categories.
///
/// Each category owns a top-level directory under the sorted root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Image files (JPEG, PNG, JPG, SVG)
    Images,
    /// Document files (DOC, DOCX, TXT, PDF, XLSX, PPTX)
    Document,
    /// Audio files (MP3, OGG, WAV, AMR)
    Audio,
    /// Video files (AVI, MP4, MOV, MKV)
    Video,
    /// Archive files (ZIP, GZ, TAR)
    Archives,
    /// Anything with an extension outside the table
    UnknownFile,
}

impl Category {
    /// All categories, in the order their directories are created.
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Document,
        Category::Audio,
        Category::Video,
        Category::Archives,
        Category::UnknownFile,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortdir::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::UnknownFile.dir_name(), "unknown_file");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Document => "document",
            Category::Audio => "audio",
            Category::Video => "video",
            Category::Archives => "archives",
            Category::UnknownFile => "unknown_file",
        }
    }

    /// Returns the extensions recognized for this category.
    ///
    /// `UnknownFile` has none; it is the fallback for everything else.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Images => &[".jpeg", ".png", ".jpg", ".svg"],
            Category::Document => &[".doc", ".docx", ".txt", ".pdf", ".xlsx", ".pptx"],
            Category::Audio => &[".mp3", ".ogg", ".wav", ".amr"],
            Category::Video => &[".avi", ".mp4", ".mov", ".mkv"],
            Category::Archives => &[".zip", ".gz", ".tar"],
            Category::UnknownFile => &[],
        }
    }

    /// Maps an extension (with its leading dot, or empty) to a category.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortdir::file_category::Category;
    ///
    /// assert_eq!(Category::from_extension(".tar"), Category::Archives);
    /// assert_eq!(Category::from_extension(""), Category::UnknownFile);
    /// ```
    pub fn from_extension(ext: &str) -> Category {
        match ext {
            ".jpeg" | ".png" | ".jpg" | ".svg" => Category::Images,
            ".avi" | ".mp4" | ".mov" | ".mkv" => Category::Video,
            ".doc" | ".docx" | ".txt" | ".pdf" | ".xlsx" | ".pptx" => Category::Document,
            ".mp3" | ".ogg" | ".wav" | ".amr" => Category::Audio,
            ".zip" | ".gz" | ".tar" => Category::Archives,
            _ => Category::UnknownFile,
        }
    }

    /// Returns true for every category except `UnknownFile`.
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::UnknownFile)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Images.dir_name(), "images");
        assert_eq!(Category::Document.dir_name(), "document");
        assert_eq!(Category::Audio.dir_name(), "audio");
        assert_eq!(Category::Video.dir_name(), "video");
        assert_eq!(Category::Archives.dir_name(), "archives");
        assert_eq!(Category::UnknownFile.dir_name(), "unknown_file");
    }

    #[test]
    fn test_from_extension_matches_every_listed_extension() {
        for category in Category::ALL {
            for ext in category.extensions() {
                assert_eq!(Category::from_extension(ext), category, "{ext}");
            }
        }
    }

    #[test]
    fn test_from_extension_is_case_sensitive() {
        assert_eq!(Category::from_extension(".JPG"), Category::UnknownFile);
        assert_eq!(Category::from_extension(".Pdf"), Category::UnknownFile);
    }

    #[test]
    fn test_from_extension_requires_leading_dot() {
        assert_eq!(Category::from_extension("jpg"), Category::UnknownFile);
    }

    #[test]
    fn test_unknown_extensions() {
        assert_eq!(Category::from_extension(".rs"), Category::UnknownFile);
        assert_eq!(Category::from_extension(".unknownext"), Category::UnknownFile);
        assert_eq!(Category::from_extension(""), Category::UnknownFile);
    }

    #[test]
    fn test_is_known() {
        let known: Vec<_> = Category::ALL.iter().filter(|c| c.is_known()).collect();
        assert_eq!(known.len(), 5);
        assert!(!Category::UnknownFile.is_known());
    }
}
