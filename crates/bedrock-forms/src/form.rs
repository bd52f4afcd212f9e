//! Form trait and `BaseForm` implementation.
//!
//! The [`Form`] trait is the core abstraction for all form types. Validation
//! is async because form-level checks may call out to other services (a
//! captcha verifier, for instance).
//!
//! [`BaseForm`] provides a concrete, general-purpose implementation of the
//! `Form` trait that can be constructed from a list of field definitions.
//! Site forms usually wrap a `BaseForm` and override [`Form::clean`].

use std::collections::HashMap;

use async_trait::async_trait;
use bedrock_http::QueryDict;

use crate::bound_field::BoundField;
use crate::fields::FormFieldDef;
use crate::value::Value;
use crate::validation;

/// The `errors()` key for errors that belong to the form as a whole.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// The core form trait. All form types implement this.
///
/// All implementations must be `Send + Sync` to work safely across async task
/// boundaries.
#[async_trait]
pub trait Form: Send + Sync {
    /// Returns the form's field definitions, in display order.
    fn fields(&self) -> &[FormFieldDef];

    /// Returns the form-level initial values, which override field initials.
    fn initial(&self) -> &HashMap<String, Value>;

    /// Returns the form prefix (for namespacing multiple forms on one page).
    fn prefix(&self) -> Option<&str>;

    /// Binds submitted data to this form, clearing any previous results.
    fn bind(&mut self, data: &QueryDict);

    /// Returns `true` if this form has been bound to data.
    fn is_bound(&self) -> bool;

    /// Validates the form. Returns `true` if valid.
    ///
    /// After calling this, `errors()` and `cleaned_data()` are populated.
    /// An unbound form is never valid.
    async fn is_valid(&mut self) -> bool;

    /// Returns validation errors keyed by field name, with form-level errors
    /// under [`NON_FIELD_ERRORS`].
    fn errors(&self) -> &HashMap<String, Vec<String>>;

    /// Returns the cleaned (validated and coerced) data of the fields that
    /// passed field-level validation.
    fn cleaned_data(&self) -> &HashMap<String, Value>;

    /// Form-level validation hook, run after field-level validation.
    ///
    /// The default implementation does nothing.
    async fn clean(&self) -> Result<(), HashMap<String, Vec<String>>> {
        Ok(())
    }

    /// Returns the form-level errors.
    fn non_field_errors(&self) -> &[String] {
        self.errors()
            .get(NON_FIELD_ERRORS)
            .map_or(&[][..], Vec::as_slice)
    }
}

/// A general-purpose form implementation.
///
/// `BaseForm` holds a list of field definitions and manages binding,
/// validation, and cleaned data.
#[derive(Debug, Default)]
pub struct BaseForm {
    field_defs: Vec<FormFieldDef>,
    initial_data: HashMap<String, Value>,
    prefix: Option<String>,
    bound: bool,
    raw_data: HashMap<String, Option<String>>,
    errors: HashMap<String, Vec<String>>,
    cleaned_data: HashMap<String, Value>,
}

impl BaseForm {
    /// Creates a new `BaseForm` with the given field definitions.
    pub fn new(fields: Vec<FormFieldDef>) -> Self {
        Self {
            field_defs: fields,
            ..Self::default()
        }
    }

    /// Sets initial (default) values for fields.
    #[must_use]
    pub fn with_initial(mut self, initial: HashMap<String, Value>) -> Self {
        self.initial_data = initial;
        self
    }

    /// Sets the form prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Appends a field after construction.
    pub fn add_field(&mut self, field: FormFieldDef) {
        self.field_defs.push(field);
    }

    /// Looks up a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FormFieldDef> {
        self.field_defs.iter().find(|f| f.name == name)
    }

    /// Looks up a field definition by name for modification.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormFieldDef> {
        self.field_defs.iter_mut().find(|f| f.name == name)
    }

    /// Sets a form-level initial value for one field.
    pub fn set_initial(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.initial_data.insert(name.into(), value.into());
    }

    /// Returns the HTML name for a field, applying the prefix.
    pub fn add_prefix(&self, name: &str) -> String {
        self.prefix
            .as_ref()
            .map_or_else(|| name.to_string(), |p| format!("{p}-{name}"))
    }

    /// Returns the value a widget should show for `field` on an unbound form.
    fn initial_for(&self, field: &FormFieldDef) -> Option<String> {
        self.initial_data
            .get(&field.name)
            .or(field.initial.as_ref())
            .and_then(Value::to_widget_value)
    }

    fn bind_field<'a>(&'a self, field: &'a FormFieldDef) -> BoundField<'a> {
        let value = if self.bound && !field.disabled {
            self.raw_data.get(&field.name).cloned().flatten()
        } else {
            self.initial_for(field)
        };
        let errors = self.errors.get(&field.name).map_or(&[][..], Vec::as_slice);
        BoundField::new(field, value, errors, self.prefix.as_deref())
    }

    /// Returns the bound field for `name`, if the form has such a field.
    pub fn bound_field(&self, name: &str) -> Option<BoundField<'_>> {
        self.field(name).map(|field| self.bind_field(field))
    }

    /// Returns bound fields for template iteration, in field order.
    pub fn bound_fields(&self) -> Vec<BoundField<'_>> {
        self.field_defs.iter().map(|f| self.bind_field(f)).collect()
    }

    /// Runs field-level validation only, replacing previous results.
    ///
    /// Wrapping forms call this from their own `is_valid` before running
    /// their form-level checks.
    pub fn clean_fields(&mut self) {
        self.errors.clear();
        self.cleaned_data.clear();
        validation::clean_fields(
            &self.field_defs,
            &self.raw_data,
            &self.initial_data,
            &mut self.cleaned_data,
            &mut self.errors,
        );
    }

    /// Merges errors (typically from [`Form::clean`]) into the form's errors.
    ///
    /// Fields that gain an error lose their cleaned value.
    pub fn merge_errors(&mut self, errors: HashMap<String, Vec<String>>) {
        for (key, msgs) in errors {
            self.cleaned_data.remove(&key);
            self.errors.entry(key).or_default().extend(msgs);
        }
    }

    /// Records an error on `field`, or on the form as a whole when `None`.
    ///
    /// The field's cleaned value, if any, is discarded.
    pub fn add_error(&mut self, field: Option<&str>, message: impl Into<String>) {
        let key = field.unwrap_or(NON_FIELD_ERRORS);
        self.cleaned_data.remove(key);
        self.errors
            .entry(key.to_string())
            .or_default()
            .push(message.into());
    }
}

#[async_trait]
impl Form for BaseForm {
    fn fields(&self) -> &[FormFieldDef] {
        &self.field_defs
    }

    fn initial(&self) -> &HashMap<String, Value> {
        &self.initial_data
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn bind(&mut self, data: &QueryDict) {
        self.bound = true;
        self.errors.clear();
        self.cleaned_data.clear();
        self.raw_data = self
            .field_defs
            .iter()
            .map(|field| {
                let html_name = self.add_prefix(&field.name);
                (field.name.clone(), field.widget.value_from_data(data, &html_name))
            })
            .collect();
    }

    fn is_bound(&self) -> bool {
        self.bound
    }

    async fn is_valid(&mut self) -> bool {
        if !self.bound {
            return false;
        }

        self.clean_fields();

        if let Err(form_errors) = self.clean().await {
            self.merge_errors(form_errors);
        }

        self.errors.is_empty()
    }

    fn errors(&self) -> &HashMap<String, Vec<String>> {
        &self.errors
    }

    fn cleaned_data(&self) -> &HashMap<String, Value> {
        &self.cleaned_data
    }
}
