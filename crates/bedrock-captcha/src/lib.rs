//! # bedrock-captcha
//!
//! reCAPTCHA support for bedrock-rs forms: a widget that renders the
//! challenge, a field constructor, and verifiers that check the submitted
//! token with the reCAPTCHA service (or accept a fixed token in tests).

pub mod field;
pub mod verifier;
pub mod widget;

pub use field::{captcha_field, verify_captcha, CAPTCHA_ERROR};
pub use verifier::{
    verifier_from_settings, CaptchaVerifier, RecaptchaVerifier, TestingVerifier, TESTING_TOKEN,
};
pub use widget::{ReCaptchaWidget, RESPONSE_FIELD};
