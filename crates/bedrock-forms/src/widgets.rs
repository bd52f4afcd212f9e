//! Widget system for rendering HTML form elements.
//!
//! Widgets are the bridge between form fields and their HTML representation.
//! Each widget knows how to render itself as HTML, extract a value from
//! submitted form data, and generate an appropriate `id` attribute for
//! its `<label>` element.
//!
//! Attribute values, input values and option labels are always escaped.
//! Attributes are emitted in sorted order so output is deterministic.

use std::collections::HashMap;
use std::fmt;

use bedrock_http::QueryDict;

use crate::safestring::{escape_html, mark_safe, SafeString};

/// HTML attributes for a widget, `name -> value`.
pub type Attrs = HashMap<String, String>;

/// Enumerates the widget types known to the forms layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`, or another text-like input type.
    TextInput,
    /// `<input type="email">`.
    EmailInput,
    /// `<input type="hidden">`.
    HiddenInput,
    /// `<textarea>`.
    Textarea,
    /// `<input type="checkbox">`.
    CheckboxInput,
    /// `<select>`.
    Select,
    /// A set of `<input type="radio">` elements.
    RadioSelect,
    /// A widget defined outside this crate.
    Custom(&'static str),
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::TextInput => "TextInput",
            Self::EmailInput => "EmailInput",
            Self::HiddenInput => "HiddenInput",
            Self::Textarea => "Textarea",
            Self::CheckboxInput => "CheckboxInput",
            Self::Select => "Select",
            Self::RadioSelect => "RadioSelect",
            Self::Custom(name) => name,
        };
        write!(f, "{name}")
    }
}

/// A trait for HTML form widgets.
///
/// Widgets are responsible for:
/// - Rendering an HTML element for a given field name and value
/// - Extracting the raw value from submitted `QueryDict` data
/// - Generating the `id` attribute for an associated `<label>` element
///
/// The `attrs` passed to [`render`](Widget::render) are merged over the
/// widget's own [`attrs`](Widget::attrs); callers' maps are never modified.
pub trait Widget: Send + Sync + fmt::Debug {
    /// Returns the widget type enum variant.
    fn widget_type(&self) -> WidgetType;

    /// The attributes this widget was configured with.
    fn attrs(&self) -> &Attrs;

    /// Renders the widget as HTML.
    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString;

    /// Extracts the raw value for `name` from submitted data.
    ///
    /// Returns `None` if nothing was submitted for this widget.
    fn value_from_data(&self, data: &QueryDict, name: &str) -> Option<String> {
        data.get(name).map(String::from)
    }

    /// Returns the HTML `id` a `<label>` for this widget should target.
    fn id_for_label(&self, id: &str) -> String {
        id.to_string()
    }

    fn is_hidden(&self) -> bool {
        false
    }

    /// Replaces the choices offered by the widget. A no-op for widgets
    /// without choices.
    fn set_choices(&mut self, _choices: &[(String, String)]) {}
}

/// Merges `extra` over `base` into a new attribute map.
pub fn build_attrs(base: &Attrs, extra: &Attrs) -> Attrs {
    let mut attrs = base.clone();
    attrs.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    attrs
}

/// Formats attributes as ` key="value"` pairs, sorted by key.
pub fn flatatt(attrs: &Attrs) -> String {
    let mut keys: Vec<&String> = attrs.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|k| format!(r#" {}="{}""#, escape_html(k), escape_html(&attrs[k])))
        .collect()
}

fn attrs_from<I, K, V>(pairs: I) -> Attrs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

// ---------------------------------------------------------------------------
// Built-in widgets
// ---------------------------------------------------------------------------

/// An `<input>` widget; `type="text"` unless configured otherwise.
#[derive(Debug, Clone)]
pub struct TextInput {
    input_type: String,
    attrs: Attrs,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self::with_type("text")
    }

    /// Creates an input with a different `type`, e.g. `"email"` or `"url"`.
    pub fn with_type(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            attrs: Attrs::new(),
        }
    }

    /// Sets the widget's own attributes.
    #[must_use]
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attrs = attrs_from(attrs);
        self
    }

    pub fn input_type(&self) -> &str {
        &self.input_type
    }
}

impl Widget for TextInput {
    fn widget_type(&self) -> WidgetType {
        if self.input_type == "email" {
            WidgetType::EmailInput
        } else {
            WidgetType::TextInput
        }
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString {
        let val = escape_html(value.unwrap_or(""));
        mark_safe(format!(
            r#"<input type="{}" name="{}" value="{val}"{} />"#,
            escape_html(&self.input_type),
            escape_html(name),
            flatatt(&build_attrs(&self.attrs, attrs))
        ))
    }
}

/// An `<input type="hidden">` widget.
#[derive(Debug, Clone, Default)]
pub struct HiddenInput {
    attrs: Attrs,
}

impl HiddenInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Widget for HiddenInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::HiddenInput
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString {
        let val = escape_html(value.unwrap_or(""));
        mark_safe(format!(
            r#"<input type="hidden" name="{}" value="{val}"{} />"#,
            escape_html(name),
            flatatt(&build_attrs(&self.attrs, attrs))
        ))
    }

    fn is_hidden(&self) -> bool {
        true
    }
}

/// A `<textarea>` widget. Defaults to `cols="40" rows="10"`.
#[derive(Debug, Clone)]
pub struct Textarea {
    attrs: Attrs,
}

impl Default for Textarea {
    fn default() -> Self {
        Self::new()
    }
}

impl Textarea {
    pub fn new() -> Self {
        Self {
            attrs: attrs_from([("cols", "40"), ("rows", "10")]),
        }
    }

    /// Merges `attrs` over the default `cols`/`rows`.
    #[must_use]
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attrs.extend(attrs_from(attrs));
        self
    }
}

impl Widget for Textarea {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Textarea
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString {
        let val = escape_html(value.unwrap_or(""));
        mark_safe(format!(
            r#"<textarea name="{}"{}>{val}</textarea>"#,
            escape_html(name),
            flatatt(&build_attrs(&self.attrs, attrs))
        ))
    }
}

/// An `<input type="checkbox">` widget for a boolean field.
///
/// Browsers omit unchecked boxes from the submitted data, so an absent value
/// means "unchecked".
#[derive(Debug, Clone, Default)]
pub struct CheckboxInput {
    attrs: Attrs,
}

impl CheckboxInput {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attrs = attrs_from(attrs);
        self
    }

    /// Whether a raw value renders as checked.
    pub fn is_checked(value: Option<&str>) -> bool {
        value.is_some_and(|v| {
            !v.is_empty() && !v.eq_ignore_ascii_case("false") && v != "0"
        })
    }
}

impl Widget for CheckboxInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::CheckboxInput
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString {
        let checked = if Self::is_checked(value) { " checked" } else { "" };
        mark_safe(format!(
            r#"<input type="checkbox" name="{}"{checked}{} />"#,
            escape_html(name),
            flatatt(&build_attrs(&self.attrs, attrs))
        ))
    }
}

/// A `<select>` widget.
#[derive(Debug, Clone, Default)]
pub struct Select {
    /// The available choices as `(value, display_label)` pairs.
    pub choices: Vec<(String, String)>,
    attrs: Attrs,
}

impl Select {
    /// Creates a new `Select` widget with the given choices.
    pub fn new(choices: Vec<(String, String)>) -> Self {
        Self {
            choices,
            attrs: Attrs::new(),
        }
    }

    #[must_use]
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attrs = attrs_from(attrs);
        self
    }
}

impl Widget for Select {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Select
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString {
        let current = value.unwrap_or("");
        let options: String = self
            .choices
            .iter()
            .map(|(val, label)| {
                let selected = if val == current { " selected" } else { "" };
                format!(
                    r#"<option value="{}"{selected}>{}</option>"#,
                    escape_html(val),
                    escape_html(label)
                )
            })
            .collect();
        mark_safe(format!(
            r#"<select name="{}"{}>{options}</select>"#,
            escape_html(name),
            flatatt(&build_attrs(&self.attrs, attrs))
        ))
    }

    fn set_choices(&mut self, choices: &[(String, String)]) {
        self.choices = choices.to_vec();
    }
}

/// Lays out the rendered options of a [`RadioSelect`].
///
/// Each option arrives as a complete `<label><input type="radio" /> text</label>`
/// fragment; the renderer decides what, if anything, goes around them.
pub trait ChoiceRenderer: Send + Sync + fmt::Debug {
    fn render(&self, options: Vec<SafeString>) -> SafeString;
}

/// The default radio layout: one `<div>` per option inside an outer `<div>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackedRenderer;

impl ChoiceRenderer for StackedRenderer {
    fn render(&self, options: Vec<SafeString>) -> SafeString {
        let mut html = mark_safe("<div>");
        for option in options {
            html.push_safe(&mark_safe(format!("<div>{option}</div>")));
        }
        html.push_safe(&mark_safe("</div>"));
        html
    }
}

/// A set of `<input type="radio">` elements.
#[derive(Debug)]
pub struct RadioSelect {
    /// The available choices as `(value, display_label)` pairs.
    pub choices: Vec<(String, String)>,
    attrs: Attrs,
    renderer: Box<dyn ChoiceRenderer>,
}

impl Default for RadioSelect {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RadioSelect {
    /// Creates a new `RadioSelect` widget with the given choices.
    pub fn new(choices: Vec<(String, String)>) -> Self {
        Self {
            choices,
            attrs: Attrs::new(),
            renderer: Box::new(StackedRenderer),
        }
    }

    /// Replaces the layout used around the individual radio inputs.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl ChoiceRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Renders the individual `<label><input type="radio" …/> label</label>`
    /// fragments, in choice order.
    pub fn render_options(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> Vec<SafeString> {
        let current = value.unwrap_or("");
        let mut attrs = build_attrs(&self.attrs, attrs);
        let id_base = attrs.remove("id");

        self.choices
            .iter()
            .enumerate()
            .map(|(i, (val, label))| {
                let checked = if val == current { " checked" } else { "" };
                let mut option_attrs = attrs.clone();
                let label_for = id_base.as_ref().map_or_else(String::new, |id| {
                    let option_id = format!("{id}_{i}");
                    let label_for = format!(r#" for="{}""#, escape_html(&option_id));
                    option_attrs.insert("id".to_string(), option_id);
                    label_for
                });
                mark_safe(format!(
                    r#"<label{label_for}><input type="radio" name="{}" value="{}"{checked}{} /> {}</label>"#,
                    escape_html(name),
                    escape_html(val),
                    flatatt(&option_attrs),
                    escape_html(label)
                ))
            })
            .collect()
    }
}

impl Widget for RadioSelect {
    fn widget_type(&self) -> WidgetType {
        WidgetType::RadioSelect
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString {
        self.renderer.render(self.render_options(name, value, attrs))
    }

    fn id_for_label(&self, id: &str) -> String {
        format!("{id}_0")
    }

    fn set_choices(&mut self, choices: &[(String, String)]) {
        self.choices = choices.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<(String, String)> {
        vec![
            ("H".to_string(), "HTML".to_string()),
            ("T".to_string(), "Text".to_string()),
        ]
    }

    fn id_attrs(id: &str) -> Attrs {
        attrs_from([("id", id)])
    }

    #[test]
    fn test_flatatt_sorted_and_escaped() {
        let attrs = attrs_from([("required", "true"), ("class", "a\"b"), ("id", "x")]);
        assert_eq!(
            flatatt(&attrs),
            r#" class="a&quot;b" id="x" required="true""#
        );
        assert_eq!(flatatt(&Attrs::new()), "");
    }

    #[test]
    fn test_text_input_render() {
        let html = TextInput::new().render("source_url", Some("http://x.org/?a=1&b=2"), &id_attrs("id_source_url"));
        assert_eq!(
            html.as_str(),
            r#"<input type="text" name="source_url" value="http://x.org/?a=1&amp;b=2" id="id_source_url" />"#
        );
    }

    #[test]
    fn test_text_input_with_type_and_attrs() {
        let w = TextInput::with_type("email").with_attrs([("required", "true")]);
        assert_eq!(w.widget_type(), WidgetType::EmailInput);
        let html = w.render("email", None, &Attrs::new());
        assert!(html.as_str().starts_with(r#"<input type="email" name="email" value="""#));
        assert!(html.as_str().contains(r#"required="true""#));
    }

    #[test]
    fn test_render_attrs_override_widget_attrs() {
        let w = TextInput::new().with_attrs([("class", "wide")]);
        let html = w.render("q", None, &attrs_from([("class", "narrow")]));
        assert!(html.as_str().contains(r#"class="narrow""#));
        assert_eq!(w.attrs().get("class").map(String::as_str), Some("wide"));
    }

    #[test]
    fn test_hidden_input() {
        let w = HiddenInput::new();
        assert!(w.is_hidden());
        let html = w.render("newsletter", Some("app-dev"), &Attrs::new());
        assert_eq!(
            html.as_str(),
            r#"<input type="hidden" name="newsletter" value="app-dev" />"#
        );
    }

    #[test]
    fn test_textarea_defaults_and_override() {
        let html = Textarea::new().render("comments", Some("<hi>"), &Attrs::new());
        assert_eq!(
            html.as_str(),
            r#"<textarea name="comments" cols="40" rows="10">&lt;hi&gt;</textarea>"#
        );
        let w = Textarea::new().with_attrs([("rows", ""), ("cols", "")]);
        let html = w.render("comments", None, &Attrs::new());
        assert!(html.as_str().contains(r#"cols="" rows="""#));
    }

    #[test]
    fn test_checkbox_checked_states() {
        let w = CheckboxInput::new();
        assert!(w.render("privacy", Some("on"), &Attrs::new()).as_str().contains(" checked"));
        assert!(w.render("privacy", Some("true"), &Attrs::new()).as_str().contains(" checked"));
        assert!(!w.render("privacy", Some("false"), &Attrs::new()).as_str().contains(" checked"));
        assert!(!w.render("privacy", None, &Attrs::new()).as_str().contains(" checked"));
    }

    #[test]
    fn test_checkbox_value_from_data_absent() {
        let data = QueryDict::parse("email=a%40b.org");
        assert_eq!(CheckboxInput::new().value_from_data(&data, "privacy"), None);
    }

    #[test]
    fn test_select_render() {
        let mut w = Select::new(Vec::new());
        w.set_choices(&[
            ("fr".to_string(), "France".to_string()),
            ("us".to_string(), "United States & Co".to_string()),
        ]);
        let html = w.render("country", Some("us"), &id_attrs("id_country"));
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<select name="country" id="id_country">"#,
                r#"<option value="fr">France</option>"#,
                r#"<option value="us" selected>United States &amp; Co</option>"#,
                "</select>"
            )
        );
    }

    #[test]
    fn test_radio_select_stacked() {
        let w = RadioSelect::new(choices());
        let html = w.render("fmt", Some("H"), &id_attrs("id_fmt"));
        assert_eq!(
            html.as_str(),
            concat!(
                "<div>",
                r#"<div><label for="id_fmt_0"><input type="radio" name="fmt" value="H" checked id="id_fmt_0" /> HTML</label></div>"#,
                r#"<div><label for="id_fmt_1"><input type="radio" name="fmt" value="T" id="id_fmt_1" /> Text</label></div>"#,
                "</div>"
            )
        );
        assert_eq!(w.id_for_label("id_fmt"), "id_fmt_0");
    }

    #[test]
    fn test_radio_select_without_id() {
        let options = RadioSelect::new(choices()).render_options("fmt", None, &Attrs::new());
        assert_eq!(
            options[1].as_str(),
            r#"<label><input type="radio" name="fmt" value="T" /> Text</label>"#
        );
    }

    #[derive(Debug)]
    struct Comma;

    impl ChoiceRenderer for Comma {
        fn render(&self, options: Vec<SafeString>) -> SafeString {
            mark_safe(
                options
                    .iter()
                    .map(SafeString::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
            )
        }
    }

    #[test]
    fn test_radio_select_custom_renderer() {
        let w = RadioSelect::new(choices()).with_renderer(Comma);
        let html = w.render("fmt", None, &Attrs::new());
        assert_eq!(html.as_str().matches("<label>").count(), 2);
        assert!(html.as_str().contains("</label>,<label>"));
        assert!(!html.as_str().starts_with("<div>"));
    }

    #[test]
    fn test_widget_type_display() {
        assert_eq!(WidgetType::RadioSelect.to_string(), "RadioSelect");
        assert_eq!(WidgetType::Custom("PrivacyWidget").to_string(), "PrivacyWidget");
    }
}
