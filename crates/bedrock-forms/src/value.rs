//! Cleaned form values.

use std::fmt;

/// A value produced by cleaning a form field, or supplied as initial data.
///
/// # Examples
///
/// ```
/// use bedrock_forms::Value;
///
/// assert_eq!(Value::from("H"), Value::String("H".to_string()));
/// assert_eq!(Value::from(true).to_widget_value(), Some("true".to_string()));
/// assert_eq!(Value::Null.to_widget_value(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    Null,
    /// A checkbox state.
    Bool(bool),
    /// Text, an email address, a URL, or a choice key.
    String(String),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string content, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a `Bool`.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts the value into the string a widget renders, `None` for `Null`.
    pub fn to_widget_value(&self) -> Option<String> {
        match self {
            Self::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::from("us").to_string(), "us");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from("fr").as_str(), Some("fr"));
        assert_eq!(Value::from(true).as_str(), None);
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert!(Value::from(None::<String>).is_null());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::Bool(true),
            Value::from("H"),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,true,"H"]"#);
    }
}
