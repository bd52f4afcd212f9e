//! # bedrock-forms
//!
//! Forms for bedrock-rs. Provides field definitions with type-level
//! validation, widgets that render HTML as [`SafeString`]s, bound fields for
//! templates, and the async [`Form`] trait with its general-purpose
//! [`BaseForm`] implementation.

pub mod bound_field;
pub mod fields;
pub mod form;
pub mod safestring;
pub mod validation;
pub mod value;
pub mod widgets;

pub use bound_field::BoundField;
pub use fields::{clean_field_value, FormFieldDef, FormFieldType};
pub use form::{BaseForm, Form, NON_FIELD_ERRORS};
pub use safestring::{conditional_escape, escape_html, mark_safe, SafeString};
pub use value::Value;
pub use widgets::{Attrs, Widget, WidgetType};
