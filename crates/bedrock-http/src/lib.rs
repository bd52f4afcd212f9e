//! # bedrock-http
//!
//! Request-side plumbing for bedrock-rs forms. Submitted form bodies and query
//! strings are parsed into a [`QueryDict`], which is what forms bind to.

pub mod querydict;

pub use querydict::QueryDict;
