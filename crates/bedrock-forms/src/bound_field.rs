//! Bound fields: form fields populated with data and errors.
//!
//! A [`BoundField`] pairs a field definition with the value to display and
//! its validation errors. It is what a page template renders for each row of
//! a form.

use crate::fields::FormFieldDef;
use crate::safestring::{escape_html, mark_safe, SafeString};
use crate::widgets::Attrs;

/// A form field bound to data and validation state.
#[derive(Debug)]
pub struct BoundField<'a> {
    /// The field's HTML name attribute, including any form prefix.
    pub name: String,
    /// The field definition.
    pub field: &'a FormFieldDef,
    /// The value to render: submitted data for a bound form, the initial
    /// value otherwise.
    pub value: Option<String>,
    /// Validation error messages for this field.
    pub errors: &'a [String],
}

impl<'a> BoundField<'a> {
    /// Creates a new `BoundField` from a field definition and current state.
    pub fn new(
        field: &'a FormFieldDef,
        value: Option<String>,
        errors: &'a [String],
        prefix: Option<&str>,
    ) -> Self {
        let name = prefix.map_or_else(|| field.name.clone(), |p| format!("{p}-{}", field.name));
        Self {
            name,
            field,
            value,
            errors,
        }
    }

    /// Renders the widget HTML for this bound field.
    ///
    /// An `id` of `id_<name>` is added unless `extra_attrs` supplies one.
    pub fn render(&self, extra_attrs: &Attrs) -> SafeString {
        let mut attrs = extra_attrs.clone();
        attrs.entry("id".to_string()).or_insert_with(|| self.auto_id());
        if self.field.disabled {
            attrs.insert("disabled".to_string(), "disabled".to_string());
        }
        self.field
            .widget
            .render(&self.name, self.value.as_deref(), &attrs)
    }

    /// Renders a `<label>` element for this field.
    pub fn label_tag(&self) -> SafeString {
        let label_id = self.field.widget.id_for_label(&self.auto_id());
        let label = escape_html(&self.field.label);
        mark_safe(format!(
            r#"<label for="{}">{label}</label>"#,
            escape_html(&label_id)
        ))
    }

    /// Returns the auto-generated HTML `id` for this field.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.name)
    }

    pub fn is_hidden(&self) -> bool {
        self.field.widget.is_hidden()
    }

    /// Returns `true` if this field has any errors.
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Renders the error list as an HTML `<ul>` element.
    pub fn errors_as_ul(&self) -> SafeString {
        if self.errors.is_empty() {
            return SafeString::new();
        }
        let items: String = self
            .errors
            .iter()
            .map(|e| format!("<li>{}</li>", escape_html(e)))
            .collect();
        mark_safe(format!(r#"<ul class="errorlist">{items}</ul>"#))
    }
}
