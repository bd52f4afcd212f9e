//! The product-details data service.
//!
//! On disk the data is a directory of JSON files:
//!
//! ```text
//! <dir>/languages.json        {"fr": {"English": "French", "native": "Français"}, ...}
//! <dir>/regions/en-US.json    {"fr": "France", "us": "United States", ...}
//! <dir>/regions/fr.json       {"fr": "France", "us": "États-Unis", ...}
//! ```
//!
//! Languages are read eagerly. Region files are read the first time a locale
//! asks for them and cached for the life of the process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

use bedrock_core::{BedrockError, BedrockResult};
use serde::Deserialize;
use tracing::{debug, warn};

/// The locale whose region names are used when a locale has none of its own.
pub const REGIONS_FALLBACK_LOCALE: &str = "en-US";

/// Display names of one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageInfo {
    /// The name in English, e.g. `"Spanish (Spain)"`.
    #[serde(rename = "English")]
    pub english: String,
    /// The name in the language itself, e.g. `"Español (de España)"`.
    pub native: String,
}

type RegionMap = Arc<HashMap<String, String>>;

/// Language and region reference data.
///
/// # Examples
///
/// ```
/// use bedrock_product_details::ProductDetails;
///
/// let details = ProductDetails::from_json(
///     r#"{"de": {"English": "German", "native": "Deutsch"}}"#,
/// )
/// .unwrap()
/// .with_regions("en-US", [("de", "Germany")]);
///
/// assert_eq!(details.native_name("de"), Some("Deutsch"));
/// assert_eq!(details.get_regions("de").get("de").map(String::as_str), Some("Germany"));
/// ```
#[derive(Debug, Default)]
pub struct ProductDetails {
    languages: HashMap<String, LanguageInfo>,
    /// Region names per locale; `None` records a locale with no region file.
    regions: RwLock<HashMap<String, Option<RegionMap>>>,
    dir: Option<PathBuf>,
}

impl ProductDetails {
    /// Creates product details from an in-memory language table, with no
    /// region data.
    pub fn new(languages: HashMap<String, LanguageInfo>) -> Self {
        Self {
            languages,
            ..Self::default()
        }
    }

    /// Parses the contents of a `languages.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`BedrockError::SerializationError`] if the JSON does not
    /// match the expected shape.
    pub fn from_json(languages_json: &str) -> BedrockResult<Self> {
        let languages = serde_json::from_str(languages_json).map_err(|e| {
            BedrockError::SerializationError(format!("Invalid languages JSON: {e}"))
        })?;
        Ok(Self::new(languages))
    }

    /// Loads `languages.json` from `dir`; region files under `dir/regions`
    /// are read on demand.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `languages.json` cannot be read, or a
    /// serialization error if it is malformed.
    pub fn from_dir(dir: impl AsRef<Path>) -> BedrockResult<Self> {
        let dir = dir.as_ref();
        let content = std::fs::read_to_string(dir.join("languages.json"))?;
        let mut details = Self::from_json(&content)?;
        debug!(
            dir = %dir.display(),
            languages = details.languages.len(),
            "loaded product details"
        );
        details.dir = Some(dir.to_path_buf());
        Ok(details)
    }

    /// Adds (or replaces) the region names for one locale.
    #[must_use]
    pub fn with_regions<I, K, V>(self, locale: &str, regions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = regions
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.regions
            .write()
            .expect("region cache lock poisoned")
            .insert(locale.to_string(), Some(Arc::new(map)));
        self
    }

    /// All known languages, keyed by code.
    pub const fn languages(&self) -> &HashMap<String, LanguageInfo> {
        &self.languages
    }

    pub fn language(&self, code: &str) -> Option<&LanguageInfo> {
        self.languages.get(code)
    }

    /// The native display name for a language code.
    pub fn native_name(&self, code: &str) -> Option<&str> {
        self.languages.get(code).map(|info| info.native.as_str())
    }

    /// Returns `code -> country name` translated for `locale`.
    ///
    /// Falls back to the [`REGIONS_FALLBACK_LOCALE`] names when the locale has
    /// no region data, and to an empty map when neither exists.
    pub fn get_regions(&self, locale: &str) -> RegionMap {
        if let Some(regions) = self.regions_for(locale) {
            return regions;
        }
        if locale != REGIONS_FALLBACK_LOCALE {
            if let Some(regions) = self.regions_for(REGIONS_FALLBACK_LOCALE) {
                debug!(locale, fallback = REGIONS_FALLBACK_LOCALE, "no region data for locale");
                return regions;
            }
        }
        warn!(locale, "no region data available");
        Arc::new(HashMap::new())
    }

    /// Cached regions for `locale`, reading them from disk on first use.
    ///
    /// A locale without a usable region file is remembered as a miss, so the
    /// file is looked up at most once.
    fn regions_for(&self, locale: &str) -> Option<RegionMap> {
        if let Some(cached) = self
            .regions
            .read()
            .expect("region cache lock poisoned")
            .get(locale)
        {
            return cached.clone();
        }

        if !is_locale_name(locale) {
            return None;
        }
        let loaded = self.load_regions(locale).map(Arc::new);
        let mut cache = self.regions.write().expect("region cache lock poisoned");
        cache.entry(locale.to_string()).or_insert(loaded).clone()
    }

    fn load_regions(&self, locale: &str) -> Option<HashMap<String, String>> {
        let path = self.dir.as_ref()?.join("regions").join(format!("{locale}.json"));
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(regions) => {
                debug!(locale, path = %path.display(), "loaded region names");
                Some(regions)
            }
            Err(e) => {
                warn!(locale, path = %path.display(), error = %e, "invalid region file");
                None
            }
        }
    }
}

/// Locale codes become file names; refuse anything that could escape the
/// regions directory.
fn is_locale_name(locale: &str) -> bool {
    !locale.is_empty()
        && locale.len() <= 16
        && locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// A lazily-configured, process-wide [`ProductDetails`].
///
/// Configure once at startup, then read from anywhere.
pub struct LazyProductDetails {
    inner: OnceLock<ProductDetails>,
}

impl Default for LazyProductDetails {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyProductDetails {
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Installs the global product details.
    ///
    /// # Errors
    ///
    /// Returns [`BedrockError::ImproperlyConfigured`] if already configured.
    pub fn configure(&self, details: ProductDetails) -> BedrockResult<()> {
        self.inner.set(details).map_err(|_| {
            BedrockError::ImproperlyConfigured(
                "Product details have already been configured".to_string(),
            )
        })
    }

    /// Returns the configured product details.
    ///
    /// # Errors
    ///
    /// Returns [`BedrockError::ImproperlyConfigured`] before
    /// [`configure`](Self::configure) has been called.
    pub fn get(&self) -> BedrockResult<&ProductDetails> {
        self.inner.get().ok_or_else(|| {
            BedrockError::ImproperlyConfigured(
                "Product details have not been configured".to_string(),
            )
        })
    }

    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global product details.
pub static PRODUCT_DETAILS: LazyProductDetails = LazyProductDetails::new();
