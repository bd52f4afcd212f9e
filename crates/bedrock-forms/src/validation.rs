//! Validation pipeline for form processing.
//!
//! 1. Field-level validation (type coercion + per-field checks)
//! 2. Form-level validation (async, may call other services)
//!
//! Errors accumulate rather than short-circuiting, so all validation
//! issues are reported at once.

use std::collections::HashMap;

use tracing::debug;

use crate::fields::{clean_field_value, FormFieldDef};
use crate::form::Form;
use crate::value::Value;

/// Performs field-level validation for all fields.
///
/// For each field definition:
/// 1. Extracts the raw value from the data map
/// 2. Runs [`clean_field_value`] for type coercion and field-level validation
/// 3. Populates `cleaned_data` on success or `errors` on failure
///
/// Disabled fields skip validation and take their initial value, with the
/// form-level initial taking precedence over the field's own.
pub fn clean_fields(
    field_defs: &[FormFieldDef],
    raw_data: &HashMap<String, Option<String>>,
    initial_data: &HashMap<String, Value>,
    cleaned_data: &mut HashMap<String, Value>,
    errors: &mut HashMap<String, Vec<String>>,
) {
    for field in field_defs {
        if field.disabled {
            if let Some(initial) = initial_data.get(&field.name).or(field.initial.as_ref()) {
                cleaned_data.insert(field.name.clone(), initial.clone());
            }
            continue;
        }

        let raw = raw_data.get(&field.name).and_then(Option::as_deref);

        match clean_field_value(field, raw) {
            Ok(value) => {
                cleaned_data.insert(field.name.clone(), value);
            }
            Err(field_errors) => {
                debug!(field = %field.name, errors = ?field_errors, "field failed validation");
                errors.insert(field.name.clone(), field_errors);
            }
        }
    }
}

/// Runs the full validation pipeline and returns its outcome.
///
/// # Returns
///
/// - `Ok(cleaned_data)` if all validation passes
/// - `Err(errors)` keyed by field name otherwise
pub async fn full_clean(
    form: &mut dyn Form,
) -> Result<HashMap<String, Value>, HashMap<String, Vec<String>>> {
    if form.is_valid().await {
        Ok(form.cleaned_data().clone())
    } else {
        Err(form.errors().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FormFieldType;
    use crate::form::BaseForm;
    use bedrock_http::QueryDict;

    fn fields() -> Vec<FormFieldDef> {
        vec![
            FormFieldDef::new("email", FormFieldType::Email),
            FormFieldDef::new("comments", FormFieldType::text()),
        ]
    }

    #[test]
    fn test_clean_fields_valid() {
        let raw = HashMap::from([
            ("email".to_string(), Some("a@b.org".to_string())),
            ("comments".to_string(), Some("Hi".to_string())),
        ]);
        let mut cleaned = HashMap::new();
        let mut errors = HashMap::new();
        clean_fields(&fields(), &raw, &HashMap::new(), &mut cleaned, &mut errors);

        assert!(errors.is_empty());
        assert_eq!(cleaned.get("comments"), Some(&Value::from("Hi")));
    }

    #[test]
    fn test_clean_fields_errors_accumulate() {
        let raw = HashMap::from([("email".to_string(), None)]);
        let mut cleaned = HashMap::new();
        let mut errors = HashMap::new();
        clean_fields(&fields(), &raw, &HashMap::new(), &mut cleaned, &mut errors);

        assert_eq!(errors.len(), 2);
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_clean_fields_disabled_uses_initial() {
        let defs = vec![FormFieldDef::new("fmt", FormFieldType::choice([("H", "HTML")]))
            .initial("H")
            .disabled(true)];
        let raw = HashMap::from([("fmt".to_string(), Some("bogus".to_string()))]);
        let mut cleaned = HashMap::new();
        let mut errors = HashMap::new();
        clean_fields(&defs, &raw, &HashMap::new(), &mut cleaned, &mut errors);

        assert!(errors.is_empty());
        assert_eq!(cleaned.get("fmt"), Some(&Value::from("H")));
    }

    #[tokio::test]
    async fn test_full_clean() {
        let mut form = BaseForm::new(fields());
        form.bind(&QueryDict::parse("email=a%40b.org&comments=hello"));
        let cleaned = full_clean(&mut form).await.unwrap();
        assert_eq!(cleaned.get("email"), Some(&Value::from("a@b.org")));

        form.bind(&QueryDict::parse("email=a%40b.org"));
        let errors = full_clean(&mut form).await.unwrap_err();
        assert!(errors.contains_key("comments"));
    }
}
