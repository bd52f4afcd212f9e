//! # bedrock-core
//!
//! Core types shared by every bedrock-rs crate. This crate has no internal
//! dependencies and provides the foundation the forms, product-details,
//! captcha, and site crates build on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Site settings and the global settings instance
//! - [`settings_loader`] - TOML/JSON loading with environment overrides
//! - [`logging`] - Tracing-based logging integration
//! - [`i18n`] - Translation catalogs, `.lang` files, and language activation

pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{BedrockError, BedrockResult};
pub use settings::{Settings, SETTINGS};
