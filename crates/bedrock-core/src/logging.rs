//! Logging integration for bedrock-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-form spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug", "info",
/// "bedrock_mozorg=debug"). In debug mode a pretty, human-readable format is
/// used; in production a structured JSON format is used.
///
/// Installing a second subscriber is a no-op, so this is safe to call from
/// tests.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for building or validating a form.
///
/// # Examples
///
/// ```
/// use bedrock_core::logging::form_span;
///
/// let span = form_span("newsletter", "en-US");
/// let _guard = span.enter();
/// tracing::debug!("building choices");
/// ```
pub fn form_span(form: &str, locale: &str) -> tracing::Span {
    tracing::debug_span!("form", name = form, locale = locale)
}
