//! Choice lists for the mozorg forms.

use std::sync::OnceLock;

use bedrock_product_details::ProductDetails;
use regex::Regex;
use tracing::debug;

/// Email formats, in display order.
pub const FORMATS: [(&str, &str); 2] = [("H", "HTML"), ("T", "Text")];

/// Newsletters the signup form can subscribe to. Value and label are the
/// same identifier.
pub const NEWSLETTER_CHOICES: [(&str, &str); 2] = [
    ("app-dev", "app-dev"),
    ("mozilla-and-you", "mozilla-and-you"),
];

/// Languages whose native names lose their trailing parenthetical,
/// e.g. `"Español (de España)"` becomes `"Español"`.
pub const LANGS_TO_STRIP: [&str; 2] = ["en-US", "es"];

/// The newsletter language used when the page locale is not offered.
pub const LANG_FALLBACK: &str = "en-US";

fn parenthetic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" \([^)]+\)$").expect("valid regex"))
}

/// Removes one trailing `" (...)"` annotation from a language name.
///
/// ```
/// use bedrock_mozorg::strip_parenthetical;
///
/// assert_eq!(strip_parenthetical("Spanish (Latin America)"), "Spanish");
/// assert_eq!(strip_parenthetical("French"), "French");
/// ```
pub fn strip_parenthetical(lang_name: &str) -> String {
    parenthetic_re().replace(lang_name, "").into_owned()
}

/// Builds the `(code, native name)` language choices for `langs`, sorted by
/// name.
///
/// Codes unknown to `details` are left out.
pub fn get_lang_choices(details: &ProductDetails, langs: &[String]) -> Vec<(String, String)> {
    let mut choices: Vec<(String, String)> = langs
        .iter()
        .filter_map(|lang| {
            let Some(native) = details.native_name(lang) else {
                debug!(lang = %lang, "language missing from product details");
                return None;
            };
            let name = if LANGS_TO_STRIP.contains(&lang.as_str()) {
                strip_parenthetical(native)
            } else {
                native.to_string()
            };
            Some((lang.clone(), name))
        })
        .collect();
    choices.sort_by(|a, b| a.1.cmp(&b.1));
    choices
}

/// Builds the `(code, country name)` choices for `locale`, sorted by name.
pub fn get_region_choices(details: &ProductDetails, locale: &str) -> Vec<(String, String)> {
    let mut regions: Vec<(String, String)> = details
        .get_regions(locale)
        .iter()
        .map(|(code, name)| (code.clone(), name.clone()))
        .collect();
    regions.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    regions
}

/// Guesses a country code from a locale: the part after the first `-`,
/// lowercased, or the whole locale when there is no `-`.
///
/// ```
/// use bedrock_mozorg::choices::country_code_guess;
///
/// assert_eq!(country_code_guess("en-US"), "us");
/// assert_eq!(country_code_guess("fr"), "fr");
/// ```
pub fn country_code_guess(locale: &str) -> String {
    let ccode = locale.to_lowercase();
    match ccode.split('-').nth(1) {
        Some(region) => region.to_string(),
        None => ccode,
    }
}

/// The initial newsletter language: `locale` when offered, otherwise
/// [`LANG_FALLBACK`].
pub fn language_initial<'a>(locale: &'a str, langs: &[String]) -> &'a str {
    if langs.iter().any(|lang| lang == locale) {
        locale
    } else {
        LANG_FALLBACK
    }
}
