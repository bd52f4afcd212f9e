//! Widgets with mozorg-specific markup.

use bedrock_core::i18n::gettext;
use bedrock_forms::widgets::{Attrs, CheckboxInput, ChoiceRenderer, TextInput, Widget, WidgetType};
use bedrock_forms::{escape_html, mark_safe, SafeString};
use bedrock_http::QueryDict;

/// The privacy notice shown next to the privacy checkbox. `%s` is the
/// policy link.
pub const PRIVACY_POLICY_TEXT: &str =
    "I’m okay with you handling this info as you explain in your <a href=\"%s\">Privacy Policy</a>";

/// Where the privacy notice links to.
pub const PRIVACY_POLICY_URL: &str = "/en-US/privacy-policy";

/// Lays radio options out side by side: each option's
/// `<label><input type="radio" /> text</label>` back to back, with no
/// container and no separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideRadios;

impl ChoiceRenderer for SideRadios {
    fn render(&self, options: Vec<SafeString>) -> SafeString {
        options.into_iter().collect()
    }
}

/// A required checkbox wrapped in a label carrying the translated privacy
/// notice.
///
/// Output:
///
/// ```text
/// <label for="{id}" class="privacy-check-label">{checkbox} <span class="title">{notice}</span></label>
/// ```
///
/// The checkbox always renders with `required="true"`. The id comes from the
/// `id` attribute, or `id_{name}` when none is given.
#[derive(Debug, Clone, Default)]
pub struct PrivacyWidget {
    checkbox: CheckboxInput,
}

impl PrivacyWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// The privacy notice in the active language, with the policy link
    /// filled in.
    pub fn policy_text() -> SafeString {
        mark_safe(gettext(PRIVACY_POLICY_TEXT).replacen("%s", PRIVACY_POLICY_URL, 1))
    }
}

impl Widget for PrivacyWidget {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Custom("PrivacyWidget")
    }

    fn attrs(&self) -> &Attrs {
        self.checkbox.attrs()
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString {
        let mut attrs = attrs.clone();
        attrs.insert("required".to_string(), "true".to_string());
        let id = attrs
            .entry("id".to_string())
            .or_insert_with(|| format!("id_{name}"))
            .clone();

        let input = self.checkbox.render(name, value, &attrs);
        mark_safe(format!(
            r#"<label for="{}" class="privacy-check-label">{input} <span class="title">{}</span></label>"#,
            escape_html(&id),
            Self::policy_text()
        ))
    }

    fn value_from_data(&self, data: &QueryDict, name: &str) -> Option<String> {
        self.checkbox.value_from_data(data, name)
    }
}

/// A text input rendered as `<input type="email">`.
#[derive(Debug, Clone)]
pub struct EmailInput {
    input: TextInput,
}

impl Default for EmailInput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailInput {
    pub fn new() -> Self {
        Self {
            input: TextInput::with_type("email"),
        }
    }

    #[must_use]
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.input = self.input.with_attrs(attrs);
        self
    }
}

impl Widget for EmailInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::EmailInput
    }

    fn attrs(&self) -> &Attrs {
        self.input.attrs()
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> SafeString {
        self.input.render(name, value, attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedrock_core::i18n::{self, catalog};
    use bedrock_forms::widgets::RadioSelect;

    fn attrs(pairs: &[(&str, &str)]) -> Attrs {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_side_radios_no_wrapper() {
        let w = RadioSelect::new(vec![
            ("H".to_string(), "HTML".to_string()),
            ("T".to_string(), "Text".to_string()),
        ])
        .with_renderer(SideRadios);
        let html = w.render("fmt", Some("H"), &attrs(&[("id", "id_fmt")]));
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<label for="id_fmt_0"><input type="radio" name="fmt" value="H" checked id="id_fmt_0" /> HTML</label>"#,
                r#"<label for="id_fmt_1"><input type="radio" name="fmt" value="T" id="id_fmt_1" /> Text</label>"#
            )
        );
    }

    #[test]
    fn test_side_radios_empty() {
        assert!(SideRadios.render(Vec::new()).is_empty());
    }

    #[test]
    fn test_privacy_widget_render() {
        i18n::deactivate();
        let html = PrivacyWidget::new().render("privacy", None, &attrs(&[("id", "id_privacy")]));
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<label for="id_privacy" class="privacy-check-label">"#,
                r#"<input type="checkbox" name="privacy" id="id_privacy" required="true" /> "#,
                r#"<span class="title">I’m okay with you handling this info as you explain in your "#,
                r#"<a href="/en-US/privacy-policy">Privacy Policy</a></span></label>"#
            )
        );
    }

    #[test]
    fn test_privacy_widget_does_not_mutate_attrs() {
        let caller = attrs(&[("id", "id_privacy"), ("class", "check")]);
        let w = PrivacyWidget::new();
        let first = w.render("privacy", Some("on"), &caller);
        let second = w.render("privacy", Some("on"), &caller);
        assert_eq!(first, second);
        assert_eq!(caller.len(), 2);
        assert!(!caller.contains_key("required"));
        assert!(first.as_str().contains(" checked"));
    }

    #[test]
    fn test_privacy_widget_overrides_required() {
        let html = PrivacyWidget::new().render("privacy", None, &attrs(&[("required", "false")]));
        assert!(html.as_str().contains(r#"required="true""#));
        assert!(!html.as_str().contains(r#"required="false""#));
    }

    #[test]
    fn test_privacy_widget_default_id() {
        let html = PrivacyWidget::new().render("privacy", None, &Attrs::new());
        assert!(html.as_str().starts_with(r#"<label for="id_privacy" "#));
        assert!(html.as_str().contains(r#"id="id_privacy""#));
    }

    #[test]
    fn test_privacy_widget_translated() {
        catalog::register_translations(
            "privacy_widget_test_de",
            [(
                PRIVACY_POLICY_TEXT,
                "Ich bin einverstanden, wie in der <a href=\"%s\">Datenschutzerklärung</a> beschrieben",
            )],
        );
        let html = i18n::with_language("privacy_widget_test_de", || {
            PrivacyWidget::new().render("privacy", None, &Attrs::new())
        });
        assert!(html
            .as_str()
            .contains(r#"<a href="/en-US/privacy-policy">Datenschutzerklärung</a>"#));
    }

    #[test]
    fn test_email_input() {
        let w = EmailInput::new().with_attrs([("required", "true")]);
        assert_eq!(w.widget_type(), WidgetType::EmailInput);
        assert_eq!(
            w.render("email", Some("a@b.org"), &attrs(&[("id", "id_email")])).as_str(),
            r#"<input type="email" name="email" value="a@b.org" id="id_email" required="true" />"#
        );
    }
}
