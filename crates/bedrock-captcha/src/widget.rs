//! The reCAPTCHA widget.

use bedrock_forms::widgets::{flatatt, Attrs, Widget, WidgetType};
use bedrock_forms::{mark_safe, SafeString};
use bedrock_http::QueryDict;

/// The form field the reCAPTCHA script fills with the response token.
pub const RESPONSE_FIELD: &str = "g-recaptcha-response";

const API_SCRIPT: &str = "https://www.google.com/recaptcha/api.js";

/// Renders the reCAPTCHA challenge.
///
/// Widget attributes become `data-` attributes of the challenge container,
/// so `theme = "clean"` renders as `data-theme="clean"`. The submitted value
/// is read from [`RESPONSE_FIELD`] rather than from the field's own name.
#[derive(Debug, Clone, Default)]
pub struct ReCaptchaWidget {
    public_key: String,
    attrs: Attrs,
}

impl ReCaptchaWidget {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
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
        self.attrs = attrs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl Widget for ReCaptchaWidget {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Custom("ReCaptchaWidget")
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(&self, _name: &str, _value: Option<&str>, attrs: &Attrs) -> SafeString {
        let mut div_attrs: Attrs = self
            .attrs
            .iter()
            .map(|(k, v)| (format!("data-{k}"), v.clone()))
            .collect();
        div_attrs.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
        div_attrs.insert("class".to_string(), "g-recaptcha".to_string());
        div_attrs.insert("data-sitekey".to_string(), self.public_key.clone());

        mark_safe(format!(
            r#"<script src="{API_SCRIPT}" async defer></script><div{}></div>"#,
            flatatt(&div_attrs)
        ))
    }

    fn value_from_data(&self, data: &QueryDict, _name: &str) -> Option<String> {
        data.get(RESPONSE_FIELD).map(String::from)
    }
}
