//! Loader for `.lang` translation files.
//!
//! A `.lang` file is a flat list of source strings and their translations:
//!
//! ```text
//! ## NOTE: shown on the contribute page
//! # Comment lines start with '#'
//! ;Area of interest?
//! Área de interés
//!
//! ;Coding
//! Coding {ok}
//! ```
//!
//! A line starting with `;` is a source string; the next non-empty,
//! non-comment line is its translation. A translation identical to the source
//! string is treated as untranslated and skipped unless it carries the
//! `{ok}` marker. The `{l10n-extra}` marker is stripped as well.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use super::catalog;
use crate::error::{BedrockError, BedrockResult};

const MARKERS: [(&str, bool); 2] = [("{l10n-extra}", false), ("{ok}", true)];

/// Parses the contents of a `.lang` file into a `source -> translation` map.
pub fn parse(content: &str) -> HashMap<String, String> {
    let mut translations = HashMap::new();
    let mut source: Option<String> = None;

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(src) = line.strip_prefix(';') {
            source = Some(src.to_string());
            continue;
        }

        let Some(src) = source.take() else {
            continue;
        };

        let mut translated = line;
        let mut marked_ok = false;
        for (marker, is_ok) in MARKERS {
            let Some(cut) = translated.len().checked_sub(marker.len()) else {
                continue;
            };
            if translated.is_char_boundary(cut) && translated[cut..].eq_ignore_ascii_case(marker) {
                translated = &translated[..cut];
                marked_ok |= is_ok;
            }
        }
        let translated = translated.trim();

        if translated == src && !marked_ok {
            continue;
        }
        translations.insert(src, translated.to_string());
    }

    translations
}

/// Reads and parses a `.lang` file.
///
/// # Errors
///
/// Returns [`BedrockError::IoError`] if the file cannot be read.
pub fn parse_file(path: impl AsRef<Path>) -> BedrockResult<HashMap<String, String>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    if content.contains('\u{FFFD}') {
        warn!(path = %path.as_ref().display(), "lang file contains replacement characters");
    }
    Ok(parse(&content))
}

/// Parses a `.lang` file and merges it into the catalog for `language`.
///
/// Returns the number of translations loaded.
///
/// # Errors
///
/// Returns [`BedrockError::IoError`] if the file cannot be read.
pub fn load_file(language: &str, path: impl AsRef<Path>) -> BedrockResult<usize> {
    let translations = parse_file(path.as_ref())?;
    let count = translations.len();
    catalog::register_translations(language, translations);
    debug!(language, count, path = %path.as_ref().display(), "loaded lang file");
    Ok(count)
}

/// Loads every `<locale_dir>/<locale>/*.lang` file into the catalog.
///
/// Returns the total number of translations loaded.
///
/// # Errors
///
/// Returns [`BedrockError::ConfigurationError`] if `locale_dir` is not a
/// directory, or an I/O error if a file cannot be read.
pub fn load_dir(locale_dir: impl AsRef<Path>) -> BedrockResult<usize> {
    let locale_dir = locale_dir.as_ref();
    if !locale_dir.is_dir() {
        return Err(BedrockError::ConfigurationError(format!(
            "locale directory '{}' does not exist",
            locale_dir.display()
        )));
    }

    let mut total = 0;
    for entry in std::fs::read_dir(locale_dir)? {
        let locale_path = entry?.path();
        if !locale_path.is_dir() {
            continue;
        }
        let Some(locale) = locale_path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        for file in std::fs::read_dir(&locale_path)? {
            let path = file?.path();
            if path.extension().is_some_and(|ext| ext == "lang") {
                total += load_file(locale, &path)?;
            }
        }
    }
    Ok(total)
}
