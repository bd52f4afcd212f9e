//! Submitted form data.
//!
//! [`QueryDict`] holds the `application/x-www-form-urlencoded` body of a POST
//! (or a query string) as a multi-valued map. Forms read a single value per
//! field with [`QueryDict::get`], which returns the last value submitted for
//! a key.

use std::collections::HashMap;

use bedrock_core::{BedrockError, BedrockResult};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

/// A multi-valued, immutable-by-default map of submitted form fields.
///
/// # Examples
///
/// ```
/// use bedrock_http::QueryDict;
///
/// let data = QueryDict::parse("email=a%40example.com&fmt=H&fmt=T");
/// assert_eq!(data.get("email"), Some("a@example.com"));
/// assert_eq!(data.get("fmt"), Some("T"));
/// assert_eq!(data.get_list("fmt"), Some(&["H".to_string(), "T".to_string()][..]));
///
/// let mut edited = data.copy();
/// edited.set("fmt", "H").unwrap();
/// assert_eq!(edited.get("fmt"), Some("H"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDict {
    values: HashMap<String, Vec<String>>,
    mutable: bool,
}

impl QueryDict {
    /// Creates an empty, immutable `QueryDict`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `QueryDict` that accepts [`set`](Self::set) and
    /// [`append`](Self::append).
    pub fn new_mutable() -> Self {
        Self {
            values: HashMap::new(),
            mutable: true,
        }
    }

    /// Parses an urlencoded body such as `"email=x%40y.org&privacy=on"`.
    ///
    /// `+` decodes to a space, a key without `=` gets an empty value and
    /// empty segments are ignored. Invalid UTF-8 is replaced lossily.
    pub fn parse(body: &str) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            values.entry(decode(key)).or_default().push(decode(value));
        }
        Self {
            values,
            mutable: false,
        }
    }

    /// Builds an immutable `QueryDict` from already-decoded pairs.
    ///
    /// Repeated keys accumulate, in iteration order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            values.entry(key.into()).or_default().push(value.into());
        }
        Self {
            values,
            mutable: false,
        }
    }

    /// Returns the last value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|list| list.last())
            .map(String::as_str)
    }

    /// Returns every value submitted for `key`, in submission order.
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// Replaces all values for `key` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`BedrockError::SuspiciousOperation`] on an immutable instance.
    pub fn set(&mut self, key: &str, value: &str) -> BedrockResult<()> {
        self.check_mutable()?;
        self.values.insert(key.to_string(), vec![value.to_string()]);
        Ok(())
    }

    /// Adds `value` to the values for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`BedrockError::SuspiciousOperation`] on an immutable instance.
    pub fn append(&mut self, key: &str, value: &str) -> BedrockResult<()> {
        self.check_mutable()?;
        self.values
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        Ok(())
    }

    /// Returns a mutable clone.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            values: self.values.clone(),
            mutable: true,
        }
    }

    /// Encodes the data back into an urlencoded string.
    ///
    /// Keys are emitted in sorted order; values of one key keep their order.
    pub fn urlencode(&self) -> String {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        keys.into_iter()
            .flat_map(|key| {
                self.values[key]
                    .iter()
                    .map(move |value| format!("{}={}", encode(key), encode(value)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub const fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn check_mutable(&self) -> BedrockResult<()> {
        if self.mutable {
            Ok(())
        } else {
            Err(BedrockError::SuspiciousOperation(
                "This QueryDict instance is immutable".to_string(),
            ))
        }
    }
}

fn decode(input: &str) -> String {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn encode(input: &str) -> String {
    utf8_percent_encode(input, NON_ALPHANUMERIC).to_string()
}
