//! # bedrock-product-details
//!
//! Read-only reference data published alongside the site: the native name of
//! every supported language and, per locale, the translated names of
//! countries. Forms read it to build their language and country choices.

pub mod details;

pub use details::{LanguageInfo, LazyProductDetails, ProductDetails, PRODUCT_DETAILS};
