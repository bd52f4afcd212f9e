//! Areas of interest offered on the contribute page.
//!
//! Labels are source strings; [`interest_choices`] translates them into the
//! language active on the current thread.

use bedrock_core::i18n::gettext;

/// `(value, untranslated label)` pairs. The blank first entry is the prompt
/// and fails validation when submitted.
pub const INTEREST_CHOICES: [(&str, &str); 16] = [
    ("", "Area of interest?"),
    ("support", "Helping Users"),
    ("qa", "Testing and QA"),
    ("coding", "Coding"),
    ("marketing", "Marketing"),
    ("localization", "Localization and Translation"),
    ("webdev", "Web Development"),
    ("addons", "Add-ons"),
    ("design", "Visual Design"),
    ("documentation", "Developer Documentation"),
    ("accessibility", "Accessibility"),
    ("it", "Systems Administration"),
    ("research", "User Research"),
    ("education", "Education"),
    ("thunderbird", "Thunderbird"),
    ("other", "Other"),
];

/// The interest choices with labels translated for the active language.
pub fn interest_choices() -> Vec<(String, String)> {
    INTEREST_CHOICES
        .iter()
        .map(|(value, label)| ((*value).to_string(), gettext(label)))
        .collect()
}
