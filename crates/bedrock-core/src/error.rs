//! Core error types for bedrock-rs.
//!
//! [`BedrockError`] covers the failures the site code can actually hit:
//! configuration problems, unreadable data files, malformed JSON, unknown
//! lookups, tampering with immutable request data, and upstream services
//! (such as the captcha verifier) that cannot be reached.
//!
//! Field-level validation failures are not errors in this sense; forms
//! collect them as messages per field.

use thiserror::Error;

/// The primary error type for bedrock-rs.
///
/// Each variant maps to an appropriate HTTP status code via
/// [`BedrockError::status_code`].
#[derive(Error, Debug)]
pub enum BedrockError {
    /// HTTP 400 Bad Request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A requested resource or lookup key does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The site is improperly configured (e.g. a global used before it was set).
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Data ─────────────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ── Security ─────────────────────────────────────────────────────

    /// A potentially malicious operation was detected.
    #[error("Suspicious operation: {0}")]
    SuspiciousOperation(String),

    // ── Upstream services ────────────────────────────────────────────

    /// An external service (e.g. captcha verification) failed or was unreachable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl BedrockError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `BadRequest` -> 400
    /// - `SuspiciousOperation` -> 403
    /// - `NotFound` -> 404
    /// - `ServiceUnavailable` -> 503
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::SuspiciousOperation(_) => 403,
            Self::NotFound(_) => 404,
            Self::ServiceUnavailable(_) => 503,
            Self::ConfigurationError(_)
            | Self::ImproperlyConfigured(_)
            | Self::SerializationError(_)
            | Self::IoError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for BedrockError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, BedrockError>`.
pub type BedrockResult<T> = Result<T, BedrockError>;
