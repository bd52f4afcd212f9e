//! Form field definitions and type-level validation.
//!
//! Each [`FormFieldDef`] describes a single form field, including its type,
//! widget, and metadata. The [`FormFieldType`] enum defines the type-specific
//! parsing and coercion performed by [`clean_field_value`].

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::value::Value;
use crate::widgets::{CheckboxInput, Select, TextInput, Widget};

/// Defines the type of a form field, including type-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFieldType {
    /// A character (string) field.
    Char {
        /// Minimum length (characters).
        min_length: Option<usize>,
        /// Maximum length (characters).
        max_length: Option<usize>,
        /// Whether to strip leading/trailing whitespace.
        strip: bool,
    },
    /// A checkbox. When required, the box must be checked.
    Boolean,
    /// An email address field.
    Email,
    /// A URL field. Values without a scheme are treated as `http://`.
    Url,
    /// A single-choice field.
    Choice {
        /// Available choices as `(value, display_label)` pairs.
        choices: Vec<(String, String)>,
    },
}

impl FormFieldType {
    /// A `Char` field with no length limits that strips whitespace.
    pub const fn text() -> Self {
        Self::Char {
            min_length: None,
            max_length: None,
            strip: true,
        }
    }

    /// A `Choice` field over the given `(value, label)` pairs.
    pub fn choice<I, K, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Choice {
            choices: choices
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The choices of a `Choice` field, empty for other types.
    pub fn choices(&self) -> &[(String, String)] {
        match self {
            Self::Choice { choices } => choices,
            _ => &[],
        }
    }
}

/// Complete definition of a form field.
///
/// A `FormFieldDef` captures everything needed to render, parse, and validate
/// a single form field.
#[derive(Debug)]
pub struct FormFieldDef {
    /// The field name (HTML name attribute, before any form prefix).
    pub name: String,
    /// The field type, controlling parsing and coercion.
    pub field_type: FormFieldType,
    /// Whether this field is required.
    pub required: bool,
    /// Default/initial value.
    pub initial: Option<Value>,
    /// Help text displayed alongside the field.
    pub help_text: String,
    /// Human-readable label.
    pub label: String,
    /// The widget used for rendering and for reading submitted data.
    pub widget: Box<dyn Widget>,
    /// Custom error messages keyed by error code
    /// (`required`, `invalid`, `invalid_choice`).
    pub error_messages: HashMap<String, String>,
    /// Whether the field is disabled (rendered but not editable).
    pub disabled: bool,
}

impl FormFieldDef {
    /// Creates a new `FormFieldDef` with sensible defaults.
    ///
    /// The field is required by default and uses the default widget for its
    /// type. A choice field's widget receives the field's choices.
    pub fn new(name: impl Into<String>, field_type: FormFieldType) -> Self {
        let name = name.into();
        let mut widget = default_widget_for_field_type(&field_type);
        widget.set_choices(field_type.choices());
        let label = name.replace('_', " ");
        Self {
            name,
            field_type,
            required: true,
            initial: None,
            help_text: String::new(),
            label,
            widget,
            error_messages: HashMap::new(),
            disabled: false,
        }
    }

    /// Sets whether this field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replaces the widget. A choice field passes its choices on to it.
    #[must_use]
    pub fn widget(mut self, widget: impl Widget + 'static) -> Self {
        self.widget = Box::new(widget);
        self.widget.set_choices(self.field_type.choices());
        self
    }

    /// Sets a custom error message for a given code.
    #[must_use]
    pub fn error_message(mut self, code: impl Into<String>, msg: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), msg.into());
        self
    }

    /// Sets whether this field is disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Replaces the choices of a choice field and its widget.
    ///
    /// Has no effect on fields of other types.
    pub fn set_choices(&mut self, choices: Vec<(String, String)>) {
        if let FormFieldType::Choice { choices: current } = &mut self.field_type {
            *current = choices;
            self.widget.set_choices(current);
        }
    }

    fn message(&self, code: &str, default: impl FnOnce() -> String) -> String {
        self.error_messages
            .get(code)
            .cloned()
            .unwrap_or_else(default)
    }
}

/// Returns the default widget for a given form field type.
pub fn default_widget_for_field_type(field_type: &FormFieldType) -> Box<dyn Widget> {
    match field_type {
        FormFieldType::Char { .. } | FormFieldType::Url => Box::new(TextInput::new()),
        FormFieldType::Email => Box::new(TextInput::with_type("email")),
        FormFieldType::Boolean => Box::new(CheckboxInput::new()),
        FormFieldType::Choice { choices } => Box::new(Select::new(choices.clone())),
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            // dot-atom local part
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            // hostname labels never start or end with '-'
            r"@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
        ))
        .expect("valid regex")
    })
}

/// Returns `true` if `raw` is a checked checkbox value.
///
/// Missing, empty, `"false"` and `"0"` are unchecked; anything else is checked.
fn parse_checkbox(raw: Option<&str>) -> bool {
    CheckboxInput::is_checked(raw)
}

/// Validates a URL, prepending `http://` when no scheme is given.
///
/// The host must be an IP address, `localhost`, or a dotted domain name.
/// URLs carrying credentials are rejected.
fn clean_url(raw: &str) -> Option<String> {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };
    let parsed = url::Url::parse(&candidate).ok()?;
    let valid = matches!(parsed.scheme(), "http" | "https" | "ftp" | "ftps")
        && parsed.username().is_empty()
        && parsed.password().is_none()
        && parsed.host().is_some_and(is_valid_host);
    valid.then_some(candidate)
}

fn is_valid_host(host: url::Host<&str>) -> bool {
    match host {
        url::Host::Ipv4(_) | url::Host::Ipv6(_) => true,
        url::Host::Domain(domain) => {
            let domain = domain.strip_suffix('.').unwrap_or(domain);
            domain.eq_ignore_ascii_case("localhost")
                || (domain.contains('.') && domain.split('.').all(|label| !label.is_empty()))
        }
    }
}

/// Cleans (validates and coerces) a raw form input string into a typed `Value`.
///
/// This performs type-level validation:
/// 1. Required check (if `required` and value is empty/None; for booleans,
///    if the box is unchecked)
/// 2. Type coercion and constraint validation (length, email/URL syntax,
///    choices)
///
/// Empty optional fields clean to [`Value::Null`], except booleans which
/// clean to `false`.
///
/// Returns the cleaned `Value` or a list of error messages.
pub fn clean_field_value(field: &FormFieldDef, raw: Option<&str>) -> Result<Value, Vec<String>> {
    let required_msg = || field.message("required", || "This field is required.".to_string());

    if field.field_type == FormFieldType::Boolean {
        let checked = parse_checkbox(raw);
        if field.required && !checked {
            return Err(vec![required_msg()]);
        }
        return Ok(Value::Bool(checked));
    }

    let raw_str = match &field.field_type {
        FormFieldType::Char { strip: false, .. } => raw.unwrap_or(""),
        _ => raw.unwrap_or("").trim(),
    };

    if raw_str.is_empty() {
        if field.required {
            return Err(vec![required_msg()]);
        }
        return Ok(Value::Null);
    }

    let mut errors = Vec::new();

    let value = match &field.field_type {
        FormFieldType::Char {
            min_length,
            max_length,
            ..
        } => {
            let len = raw_str.chars().count();
            if let Some(min) = min_length {
                if len < *min {
                    errors.push(format!(
                        "Ensure this value has at least {min} characters (it has {len})."
                    ));
                }
            }
            if let Some(max) = max_length {
                if len > *max {
                    errors.push(format!(
                        "Ensure this value has at most {max} characters (it has {len})."
                    ));
                }
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::Email => {
            if !email_regex().is_match(raw_str) {
                errors.push(field.message("invalid", || "Enter a valid email address.".to_string()));
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::Url => match clean_url(raw_str) {
            Some(url) => Value::String(url),
            None => {
                errors.push(field.message("invalid", || "Enter a valid URL.".to_string()));
                Value::String(raw_str.to_string())
            }
        },

        FormFieldType::Choice { choices } => {
            if !choices.iter().any(|(v, _)| v == raw_str) {
                errors.push(field.message("invalid_choice", || {
                    format!("Select a valid choice. {raw_str} is not one of the available choices.")
                }));
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::Boolean => Value::Bool(parse_checkbox(raw)),
    };

    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{HiddenInput, RadioSelect, WidgetType};

    #[test]
    fn test_char_field_clean() {
        let field = FormFieldDef::new("comments", FormFieldType::text());
        assert_eq!(
            clean_field_value(&field, Some("  Hello  ")),
            Ok(Value::String("Hello".to_string()))
        );
    }

    #[test]
    fn test_char_field_no_strip() {
        let field = FormFieldDef::new(
            "comments",
            FormFieldType::Char {
                min_length: None,
                max_length: None,
                strip: false,
            },
        );
        assert_eq!(
            clean_field_value(&field, Some(" x ")),
            Ok(Value::String(" x ".to_string()))
        );
    }

    #[test]
    fn test_char_field_length_limits() {
        let field = FormFieldDef::new(
            "comments",
            FormFieldType::Char {
                min_length: Some(3),
                max_length: Some(5),
                strip: true,
            },
        );
        let short = clean_field_value(&field, Some("ab")).unwrap_err();
        assert!(short[0].contains("at least 3"));
        let long = clean_field_value(&field, Some("abcdef")).unwrap_err();
        assert!(long[0].contains("at most 5"));
        assert!(clean_field_value(&field, Some("día")).is_ok());
    }

    #[test]
    fn test_required_missing() {
        let field = FormFieldDef::new("email", FormFieldType::Email);
        assert_eq!(
            clean_field_value(&field, None),
            Err(vec!["This field is required.".to_string()])
        );
        assert!(clean_field_value(&field, Some("   ")).is_err());
    }

    #[test]
    fn test_custom_required_message() {
        let field = FormFieldDef::new("email", FormFieldType::Email)
            .error_message("required", "Please enter your email.");
        assert_eq!(
            clean_field_value(&field, Some("")),
            Err(vec!["Please enter your email.".to_string()])
        );
    }

    #[test]
    fn test_optional_empty_is_null() {
        let field = FormFieldDef::new("source_url", FormFieldType::Url).required(false);
        assert_eq!(clean_field_value(&field, None), Ok(Value::Null));
    }

    #[test]
    fn test_email_validation() {
        let field = FormFieldDef::new("email", FormFieldType::Email);
        assert_eq!(
            clean_field_value(&field, Some(" fan@mail.example.org ")),
            Ok(Value::String("fan@mail.example.org".to_string()))
        );
        let err = clean_field_value(&field, Some("not-an-email")).unwrap_err();
        assert_eq!(err, vec!["Enter a valid email address.".to_string()]);
        assert!(clean_field_value(&field, Some("a@b")).is_err());
    }

    #[test]
    fn test_email_local_part_atext() {
        let field = FormFieldDef::new("email", FormFieldType::Email);
        for ok in ["o'brien@example.com", "a&b@example.com", "first.last+tag@mail.example.org"] {
            assert!(clean_field_value(&field, Some(ok)).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn test_email_malformed_dots_and_hyphens() {
        let field = FormFieldDef::new("email", FormFieldType::Email);
        for bad in [
            "a..b@example.com",
            ".a@example.com",
            "a.@example.com",
            "a@-x.com",
            "a@x-.com",
            "a@example..com",
        ] {
            assert_eq!(
                clean_field_value(&field, Some(bad)),
                Err(vec!["Enter a valid email address.".to_string()]),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_url_prepends_scheme() {
        let field = FormFieldDef::new("source_url", FormFieldType::Url);
        assert_eq!(
            clean_field_value(&field, Some("www.mozilla.org/en-US/")),
            Ok(Value::String("http://www.mozilla.org/en-US/".to_string()))
        );
        assert_eq!(
            clean_field_value(&field, Some("https://example.com")),
            Ok(Value::String("https://example.com".to_string()))
        );
    }

    #[test]
    fn test_url_invalid() {
        let field = FormFieldDef::new("source_url", FormFieldType::Url);
        assert_eq!(
            clean_field_value(&field, Some("javascript://alert(1)")),
            Err(vec!["Enter a valid URL.".to_string()])
        );
        assert!(clean_field_value(&field, Some("http://")).is_err());
    }

    #[test]
    fn test_url_host_rules() {
        let field = FormFieldDef::new("source_url", FormFieldType::Url);
        for bad in ["http://foo", "foo", "mailto:x@y.com", "http://user:pw@example.com/"] {
            assert_eq!(
                clean_field_value(&field, Some(bad)),
                Err(vec!["Enter a valid URL.".to_string()]),
                "{bad} should be rejected"
            );
        }
        for ok in ["http://localhost:8000/", "http://127.0.0.1/", "http://[::1]/", "example.com."] {
            assert!(clean_field_value(&field, Some(ok)).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn test_boolean_required_means_checked() {
        let field = FormFieldDef::new("privacy", FormFieldType::Boolean);
        assert_eq!(clean_field_value(&field, Some("on")), Ok(Value::Bool(true)));
        assert!(clean_field_value(&field, None).is_err());
        assert!(clean_field_value(&field, Some("false")).is_err());
    }

    #[test]
    fn test_boolean_optional() {
        let field = FormFieldDef::new("newsletter", FormFieldType::Boolean).required(false);
        assert_eq!(clean_field_value(&field, None), Ok(Value::Bool(false)));
        assert_eq!(clean_field_value(&field, Some("0")), Ok(Value::Bool(false)));
        assert_eq!(clean_field_value(&field, Some("true")), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_choice_validation() {
        let field = FormFieldDef::new("fmt", FormFieldType::choice([("H", "HTML"), ("T", "Text")]));
        assert_eq!(clean_field_value(&field, Some("T")), Ok(Value::from("T")));
        let err = clean_field_value(&field, Some("X")).unwrap_err();
        assert_eq!(
            err,
            vec!["Select a valid choice. X is not one of the available choices.".to_string()]
        );
    }

    #[test]
    fn test_default_widgets() {
        assert_eq!(
            FormFieldDef::new("a", FormFieldType::text()).widget.widget_type(),
            WidgetType::TextInput
        );
        assert_eq!(
            FormFieldDef::new("a", FormFieldType::Email).widget.widget_type(),
            WidgetType::EmailInput
        );
        assert_eq!(
            FormFieldDef::new("a", FormFieldType::Boolean).widget.widget_type(),
            WidgetType::CheckboxInput
        );
        assert_eq!(
            FormFieldDef::new("a", FormFieldType::choice([("x", "X")])).widget.widget_type(),
            WidgetType::Select
        );
    }

    #[test]
    fn test_widget_receives_choices() {
        let field = FormFieldDef::new("fmt", FormFieldType::choice([("H", "HTML")]))
            .widget(RadioSelect::default());
        let html = field.widget.render("fmt", None, &HashMap::new());
        assert!(html.as_str().contains(r#"value="H""#));
    }

    #[test]
    fn test_set_choices_updates_field_and_widget() {
        let mut field = FormFieldDef::new("country", FormFieldType::choice(Vec::<(String, String)>::new()));
        field.set_choices(vec![("de".to_string(), "Deutschland".to_string())]);
        assert_eq!(field.field_type.choices().len(), 1);
        let html = field.widget.render("country", Some("de"), &HashMap::new());
        assert!(html.as_str().contains("selected>Deutschland"));

        let mut hidden = FormFieldDef::new("email", FormFieldType::Email).widget(HiddenInput::new());
        hidden.set_choices(vec![("x".to_string(), "y".to_string())]);
        assert!(hidden.field_type.choices().is_empty());
    }

    #[test]
    fn test_builder_defaults() {
        let field = FormFieldDef::new("source_url", FormFieldType::Url)
            .label("Source")
            .help_text("Where you came from")
            .initial("http://x.org");
        assert!(field.required);
        assert!(!field.disabled);
        assert_eq!(field.label, "Source");
        assert_eq!(field.initial, Some(Value::from("http://x.org")));
        assert_eq!(FormFieldDef::new("source_url", FormFieldType::Url).label, "source url");
    }
}
