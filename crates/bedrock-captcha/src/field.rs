//! The captcha form field and its verification step.

use bedrock_forms::widgets::Attrs;
use bedrock_forms::{FormFieldDef, FormFieldType};
use tracing::{info, warn};

use crate::verifier::CaptchaVerifier;
use crate::widget::ReCaptchaWidget;

/// The error shown on the captcha field when verification fails.
pub const CAPTCHA_ERROR: &str = "Incorrect, please try again.";

/// Builds a required captcha field rendered with [`ReCaptchaWidget`].
///
/// Field-level cleaning only checks that a token was submitted; the token
/// itself is checked by [`verify_captcha`] during form-level validation.
pub fn captcha_field(name: impl Into<String>, public_key: &str, attrs: Attrs) -> FormFieldDef {
    FormFieldDef::new(name, FormFieldType::text())
        .widget(ReCaptchaWidget::new(public_key).with_attrs(attrs))
        .error_message("required", CAPTCHA_ERROR)
}

/// Asks `verifier` about `token`.
///
/// Returns the message to show on the field when the token is rejected or
/// cannot be checked.
pub async fn verify_captcha(
    verifier: &dyn CaptchaVerifier,
    token: &str,
    remote_ip: Option<&str>,
) -> Result<(), String> {
    match verifier.verify(token, remote_ip).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            info!(remote_ip, "captcha token rejected");
            Err(CAPTCHA_ERROR.to_string())
        }
        Err(e) => {
            warn!(error = %e, "captcha verification unavailable");
            Err(CAPTCHA_ERROR.to_string())
        }
    }
}
