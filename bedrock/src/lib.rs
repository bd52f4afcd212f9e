//! # bedrock
//!
//! Newsletter signup and contribute forms for the mozorg pages, together with
//! the forms, translation, product-details and captcha plumbing they sit on.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `bedrock` to get everything, or depend on individual
//! crates for finer-grained control.

/// Errors, settings, logging, and translations.
pub use bedrock_core as core;

/// Submitted form data (`QueryDict`).
#[cfg(feature = "http")]
pub use bedrock_http as http;

/// Fields, widgets, bound fields, and the `Form` trait.
#[cfg(feature = "forms")]
pub use bedrock_forms as forms;

/// Native language names and per-locale region lists.
#[cfg(feature = "product-details")]
pub use bedrock_product_details as product_details;

/// reCAPTCHA widget, field, and verifiers.
#[cfg(feature = "captcha")]
pub use bedrock_captcha as captcha;

/// The newsletter and contribute forms.
#[cfg(feature = "mozorg")]
pub use bedrock_mozorg as mozorg;

use bedrock_core::{BedrockError, BedrockResult, Settings, SETTINGS};

/// Prepares the process-wide state from `settings`: installs the tracing
/// subscriber, loads `.lang` files from `locale_dir`, loads product details
/// from `product_details_dir`, and finally publishes the settings.
///
/// Directories left unset are skipped.
///
/// # Errors
///
/// Returns [`BedrockError::ImproperlyConfigured`] when called a second time,
/// or the error of whichever data directory failed to load.
pub fn setup(settings: Settings) -> BedrockResult<()> {
    if SETTINGS.is_configured() {
        return Err(BedrockError::ImproperlyConfigured(
            "bedrock::setup called more than once".to_string(),
        ));
    }

    bedrock_core::logging::setup_logging(&settings);

    if let Some(dir) = &settings.locale_dir {
        let loaded = bedrock_core::i18n::dotlang::load_dir(dir)?;
        tracing::info!(dir = %dir.display(), loaded, "translations loaded");
    }

    #[cfg(feature = "product-details")]
    if let Some(dir) = &settings.product_details_dir {
        let details = bedrock_product_details::ProductDetails::from_dir(dir)?;
        tracing::info!(
            dir = %dir.display(),
            languages = details.languages().len(),
            "product details loaded"
        );
        bedrock_product_details::PRODUCT_DETAILS.configure(details)?;
    }

    SETTINGS.configure(settings);
    Ok(())
}

// Third-party re-exports for applications built on these crates.
pub use async_trait;
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;
