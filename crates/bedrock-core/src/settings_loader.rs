//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `BEDROCK_DEBUG` | `debug` |
//! | `BEDROCK_LOG_LEVEL` | `log_level` |
//! | `BEDROCK_LANGUAGE_CODE` | `language_code` |
//! | `BEDROCK_LOCALE_DIR` | `locale_dir` |
//! | `BEDROCK_NEWSLETTER_LANGUAGES` | `newsletter_languages` (comma-separated) |
//! | `BEDROCK_PRODUCT_DETAILS_DIR` | `product_details_dir` |
//! | `BEDROCK_RECAPTCHA_PUBLIC_KEY` | `recaptcha_public_key` |
//! | `BEDROCK_RECAPTCHA_PRIVATE_KEY` | `recaptcha_private_key` |
//! | `BEDROCK_RECAPTCHA_VERIFY_URL` | `recaptcha_verify_url` |
//! | `BEDROCK_RECAPTCHA_TESTING` | `recaptcha_testing` |
//!
//! ```rust,no_run
//! use bedrock_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/bedrock.toml").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::BedrockError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, BedrockError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| BedrockError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, BedrockError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, BedrockError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, BedrockError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| BedrockError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, BedrockError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `BEDROCK_*` environment variable overrides to a settings struct.
///
/// Boolean variables accept "true"/"1"/"yes" (case-insensitive); anything
/// else is false. List variables are comma-separated with blanks dropped.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("BEDROCK_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("BEDROCK_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("BEDROCK_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Ok(val) = std::env::var("BEDROCK_LOCALE_DIR") {
        settings.locale_dir = Some(PathBuf::from(val));
    }

    if let Ok(val) = std::env::var("BEDROCK_NEWSLETTER_LANGUAGES") {
        settings.newsletter_languages = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Ok(val) = std::env::var("BEDROCK_PRODUCT_DETAILS_DIR") {
        settings.product_details_dir = Some(PathBuf::from(val));
    }

    if let Ok(val) = std::env::var("BEDROCK_RECAPTCHA_PUBLIC_KEY") {
        settings.recaptcha_public_key = val;
    }

    if let Ok(val) = std::env::var("BEDROCK_RECAPTCHA_PRIVATE_KEY") {
        settings.recaptcha_private_key = val;
    }

    if let Ok(val) = std::env::var("BEDROCK_RECAPTCHA_VERIFY_URL") {
        settings.recaptcha_verify_url = val;
    }

    if let Ok(val) = std::env::var("BEDROCK_RECAPTCHA_TESTING") {
        settings.recaptcha_testing = parse_bool(&val);
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, BedrockError> {
    std::fs::read_to_string(path).map_err(|e| {
        BedrockError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

/// Deep-merges a parsed config document over the serialized defaults and
/// deserializes the result.
fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, BedrockError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        BedrockError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        BedrockError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = match base_map.remove(&key) {
                    Some(base_v) => merge_json(base_v, override_v),
                    None => override_v,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
