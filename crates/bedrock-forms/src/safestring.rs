//! HTML-safe strings.
//!
//! Widget output is a [`SafeString`]: markup that has already been escaped
//! where needed and must be inserted into a page verbatim. Plain `String`s
//! are escaped on the way in.

use std::fmt;

/// A string of HTML that must not be escaped again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct SafeString(String);

impl SafeString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends markup that is already safe.
    pub fn push_safe(&mut self, html: &Self) {
        self.0.push_str(&html.0);
    }

    /// Appends text, escaping it first.
    pub fn push_text(&mut self, text: &str) {
        self.0.push_str(&escape_html(text));
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SafeString> for String {
    fn from(s: SafeString) -> Self {
        s.0
    }
}

impl FromIterator<Self> for SafeString {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| s.0).collect())
    }
}

/// Marks a string as safe HTML without escaping it.
///
/// ```
/// use bedrock_forms::mark_safe;
///
/// let html = mark_safe("<b>bold</b>");
/// assert_eq!(html.as_str(), "<b>bold</b>");
/// ```
pub fn mark_safe(html: impl Into<String>) -> SafeString {
    SafeString(html.into())
}

/// Escapes HTML special characters.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Types that can be turned into HTML.
pub trait ToHtml {
    fn to_html(&self) -> SafeString;
}

impl ToHtml for SafeString {
    fn to_html(&self) -> SafeString {
        self.clone()
    }
}

impl ToHtml for str {
    fn to_html(&self) -> SafeString {
        SafeString(escape_html(self))
    }
}

impl ToHtml for String {
    fn to_html(&self) -> SafeString {
        self.as_str().to_html()
    }
}

/// Escapes `value` unless it is already a [`SafeString`].
///
/// ```
/// use bedrock_forms::{conditional_escape, mark_safe};
///
/// assert_eq!(conditional_escape("a < b").as_str(), "a &lt; b");
/// assert_eq!(conditional_escape(&mark_safe("<br>")).as_str(), "<br>");
/// ```
pub fn conditional_escape<T: ToHtml + ?Sized>(value: &T) -> SafeString {
    value.to_html()
}
