//! Filename normalization.
//!
//! Names are reduced to ASCII letters, digits and underscores: Cyrillic letters
//! are transliterated to Latin, every other character outside `[A-Za-z0-9]`
//! becomes `_`. For files only the stem is transformed and the extension is
//! reattached verbatim.
//!
//! ```
//! use sortdir::normalizer::{normalize_dir_name, normalize_file_name};
//!
//! assert_eq!(normalize_file_name("фото.jpg"), "foto.jpg");
//! assert_eq!(normalize_file_name("my report (1).pdf"), "my_report__1_.pdf");
//! assert_eq!(normalize_dir_name("Нова папка"), "Nova_papka");
//! ```

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]").expect("static pattern is valid"));

/// Transliterates a single Cyrillic letter, or returns it unchanged.
fn transliterate(c: char) -> char {
    match c {
        'і' | 'ї' | 'и' => 'i',
        'є' | 'е' | 'ё' | 'э' => 'e',
        'а' | 'я' => 'a',
        'б' => 'b',
        'в' => 'v',
        'г' => 'g',
        'д' => 'd',
        'ж' | 'й' => 'j',
        'з' | 'ц' => 'z',
        'к' => 'k',
        'л' => 'l',
        'м' => 'm',
        'н' => 'n',
        'о' => 'o',
        'п' => 'p',
        'р' => 'r',
        'с' | 'ш' | 'щ' => 's',
        'т' => 't',
        'у' | 'ю' => 'u',
        'ф' => 'f',
        'х' => 'h',
        'ч' => 'c',
        'ы' => 'y',
        'ъ' | 'ь' | 'Ъ' | 'Ь' => '_',
        'І' | 'Ї' | 'И' => 'I',
        'Є' | 'Е' | 'Ё' | 'Э' => 'E',
        'А' | 'Я' => 'A',
        'Б' => 'B',
        'В' => 'V',
        'Г' => 'G',
        'Д' => 'D',
        'Ж' | 'Й' => 'J',
        'З' | 'Ц' => 'Z',
        'К' => 'K',
        'Л' => 'L',
        'М' => 'M',
        'Н' => 'N',
        'О' => 'O',
        'П' => 'P',
        'Р' => 'R',
        'С' | 'Ш' | 'Щ' => 'S',
        'Т' => 'T',
        'У' | 'Ю' => 'U',
        'Ф' => 'F',
        'Х' => 'H',
        'Ч' => 'C',
        'Ы' => 'Y',
        other => other,
    }
}

/// Converts a raw name to the `[A-Za-z0-9_]` alphabet.
///
/// Each input character yields exactly one output character.
pub fn to_latin(name: &str) -> String {
    let transliterated: String = name.chars().map(transliterate).collect();
    NON_ALPHANUMERIC
        .replace_all(&transliterated, "_")
        .into_owned()
}

/// Splits a file name into stem and extension, the extension keeping its dot.
///
/// A name without an extension (including dot-files such as `.bashrc`)
/// returns the whole name as the stem and an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Normalizes a file name: the stem is transformed, the extension is kept.
pub fn normalize_file_name(name: &str) -> String {
    let (stem, ext) = split_extension(name);
    format!("{}{}", to_latin(stem), ext)
}

/// Normalizes a directory name: the whole name is transformed.
pub fn normalize_dir_name(name: &str) -> String {
    to_latin(name)
}

/// Returns `path` with its final component normalized.
///
/// The parent prefix is preserved untouched. Paths without a final
/// component are returned unchanged.
pub fn normalized_path(path: &Path, is_dir: bool) -> PathBuf {
    let Some(name) = path.file_name() else {
        return path.to_path_buf();
    };
    let name = name.to_string_lossy();
    let normalized = if is_dir {
        normalize_dir_name(&name)
    } else {
        normalize_file_name(&name)
    };
    path.with_file_name(normalized)
}
