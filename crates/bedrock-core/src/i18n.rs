//! Translation lookup for site strings.
//!
//! - **Catalog**: a process-wide registry of `msgid -> translation` maps per
//!   locale, filled from JSON or from `.lang` files.
//! - **Activation**: a thread-local active locale, set per request with
//!   [`activate`] or scoped with [`with_language`].
//! - **Lookup**: [`gettext`] translates into the active locale and falls back
//!   to the source string.
//!
//! ```
//! use bedrock_core::i18n;
//!
//! i18n::catalog::register_translations("es", vec![("Coding", "Programación")]);
//!
//! i18n::activate("es");
//! assert_eq!(i18n::gettext("Coding"), "Programación");
//! i18n::deactivate();
//! assert_eq!(i18n::gettext("Coding"), "Coding");
//! ```

pub mod catalog;
pub mod dotlang;

use std::cell::RefCell;

/// The locale used when none has been activated on the current thread.
pub const DEFAULT_LANGUAGE: &str = "en-US";

thread_local! {
    static CURRENT_LANGUAGE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Activates the given locale for the current thread.
pub fn activate(language_code: &str) {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = Some(language_code.to_string());
    });
}

/// Deactivates the current thread's locale, reverting to [`DEFAULT_LANGUAGE`].
pub fn deactivate() {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Returns the locale active on the current thread.
pub fn get_language() -> String {
    CURRENT_LANGUAGE.with(|cell| {
        cell.borrow()
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    })
}

/// Runs `f` with `language_code` active, restoring the previous locale afterwards.
///
/// ```
/// use bedrock_core::i18n;
///
/// let lang = i18n::with_language("de", i18n::get_language);
/// assert_eq!(lang, "de");
/// assert_eq!(i18n::get_language(), i18n::DEFAULT_LANGUAGE);
/// ```
pub fn with_language<R>(language_code: &str, f: impl FnOnce() -> R) -> R {
    let previous = CURRENT_LANGUAGE.with(|cell| cell.borrow_mut().replace(language_code.to_string()));
    let result = f();
    CURRENT_LANGUAGE.with(|cell| *cell.borrow_mut() = previous);
    result
}

/// Translates a message into the current thread's active locale.
///
/// If no translation is registered, returns the original `msgid`.
pub fn gettext(msgid: &str) -> String {
    let lang = get_language();
    catalog::translate(&lang, msgid).unwrap_or_else(|| msgid.to_string())
}
