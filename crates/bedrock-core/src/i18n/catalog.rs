//! Translation catalog for loading and looking up translations.
//!
//! The catalog stores translations in a global, thread-safe registry keyed by
//! locale. Entries come from `.lang` files (see [`super::dotlang`]), from JSON
//! documents, or are registered programmatically.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "messages": {
//!     "Coding": "Programación",
//!     "Testing and QA": "Pruebas y control de calidad"
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::error::{BedrockError, BedrockResult};

type Catalogs = HashMap<String, HashMap<String, String>>;

/// The global translation registry, keyed by locale.
fn global_catalogs() -> &'static RwLock<Catalogs> {
    static CATALOGS: OnceLock<RwLock<Catalogs>> = OnceLock::new();
    CATALOGS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Merges `(msgid, translated)` entries into the catalog for a locale.
///
/// Existing entries with the same `msgid` are overwritten.
pub fn register_translations<I, K, V>(language: &str, entries: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut catalogs = global_catalogs().write().expect("catalog lock poisoned");
    let messages = catalogs.entry(language.to_string()).or_default();
    for (msgid, translated) in entries {
        messages.insert(msgid.into(), translated.into());
    }
}

/// Loads translations for a locale from a JSON string.
///
/// Only string values under the top-level `messages` object are used; the
/// key itself is optional.
///
/// # Errors
///
/// Returns [`BedrockError::SerializationError`] if the JSON is invalid.
pub fn load_from_json(language: &str, json_str: &str) -> BedrockResult<()> {
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| BedrockError::SerializationError(format!("Invalid catalog JSON: {e}")))?;

    let entries: Vec<(String, String)> = value
        .get("messages")
        .and_then(serde_json::Value::as_object)
        .map(|messages| {
            messages
                .iter()
                .filter_map(|(msgid, t)| t.as_str().map(|t| (msgid.clone(), t.to_string())))
                .collect()
        })
        .unwrap_or_default();

    register_translations(language, entries);
    Ok(())
}

/// Looks up a translation in the catalog.
pub fn translate(language: &str, msgid: &str) -> Option<String> {
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    catalogs
        .get(language)
        .and_then(|messages| messages.get(msgid))
        .cloned()
}

/// Returns `true` if translations are registered for the given locale.
pub fn has_language(language: &str) -> bool {
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    catalogs.contains_key(language)
}

/// Returns all locales that have translations registered, sorted.
pub fn available_languages() -> Vec<String> {
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    let mut langs: Vec<String> = catalogs.keys().cloned().collect();
    langs.sort();
    langs
}

/// Clears all translations for a given locale.
pub fn clear_language(language: &str) {
    let mut catalogs = global_catalogs().write().expect("catalog lock poisoned");
    catalogs.remove(language);
}
