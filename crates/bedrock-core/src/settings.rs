//! Settings for the bedrock-rs site.
//!
//! This module provides the [`Settings`] struct, which holds all site
//! configuration, and [`LazySettings`], a globally-accessible,
//! lazily-initialized settings instance.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The default reCAPTCHA verification endpoint.
pub const DEFAULT_RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Site settings.
///
/// # Examples
///
/// ```
/// use bedrock_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.language_code, "en-US");
/// assert!(settings.newsletter_languages.contains(&"en-US".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,

    // ── Internationalization ─────────────────────────────────────────

    /// The default locale (e.g. "en-US").
    pub language_code: String,
    /// Directory holding `<locale>/*.lang` translation files.
    pub locale_dir: Option<PathBuf>,

    // ── Newsletter ───────────────────────────────────────────────────

    /// Language codes offered on the newsletter form.
    pub newsletter_languages: Vec<String>,

    // ── Product details ──────────────────────────────────────────────

    /// Directory holding `languages.json` and `regions/<locale>.json`.
    pub product_details_dir: Option<PathBuf>,

    // ── Captcha ──────────────────────────────────────────────────────

    /// The reCAPTCHA site key rendered into the page.
    pub recaptcha_public_key: String,
    /// The reCAPTCHA secret key sent to the verification endpoint.
    pub recaptcha_private_key: String,
    /// The reCAPTCHA verification endpoint.
    pub recaptcha_verify_url: String,
    /// When true, captcha verification accepts the literal token `PASSED`
    /// and never contacts the verification endpoint.
    pub recaptcha_testing: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter (e.g. "info", "bedrock_mozorg=debug").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,

            language_code: "en-US".to_string(),
            locale_dir: None,

            newsletter_languages: ["de", "en-US", "es", "fr", "id", "pt-BR", "ru"]
                .iter()
                .map(ToString::to_string)
                .collect(),

            product_details_dir: None,

            recaptcha_public_key: String::new(),
            recaptcha_private_key: String::new(),
            recaptcha_verify_url: DEFAULT_RECAPTCHA_VERIFY_URL.to_string(),
            recaptcha_testing: false,

            log_level: "info".to_string(),

            extra: HashMap::new(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, or `None` before configuration.
    pub fn try_get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
