//! Captcha token verification.
//!
//! [`RecaptchaVerifier`] posts the token to the reCAPTCHA `siteverify`
//! endpoint. [`TestingVerifier`] never touches the network and accepts only
//! [`TESTING_TOKEN`], for test suites and local development.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bedrock_core::{BedrockError, BedrockResult, Settings};
use serde::Deserialize;
use tracing::debug;

/// The only token [`TestingVerifier`] accepts.
pub const TESTING_TOKEN: &str = "PASSED";

/// Checks a captcha response token.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync + fmt::Debug {
    /// Returns `Ok(true)` if the token is valid, `Ok(false)` if the service
    /// rejected it.
    ///
    /// # Errors
    ///
    /// Returns [`BedrockError::ServiceUnavailable`] if the service could not
    /// be asked or gave an unreadable answer.
    async fn verify(&self, response: &str, remote_ip: Option<&str>) -> BedrockResult<bool>;
}

/// The body of a `siteverify` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,
}

/// Parses a `siteverify` response body.
///
/// # Errors
///
/// Returns [`BedrockError::ServiceUnavailable`] if the body is not the
/// expected JSON.
pub fn parse_verify_response(body: &str) -> BedrockResult<VerifyResponse> {
    serde_json::from_str(body).map_err(|e| {
        BedrockError::ServiceUnavailable(format!("Unreadable reCAPTCHA response: {e}"))
    })
}

/// Verifies tokens against the reCAPTCHA service over HTTP.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: String,
    verify_url: String,
}

impl fmt::Debug for RecaptchaVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecaptchaVerifier")
            .field("verify_url", &self.verify_url)
            .finish_non_exhaustive()
    }
}

impl RecaptchaVerifier {
    /// Creates a verifier that posts to `verify_url` with the private key
    /// `secret`.
    pub fn new(secret: impl Into<String>, verify_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            secret: secret.into(),
            verify_url: verify_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.recaptcha_private_key.clone(),
            settings.recaptcha_verify_url.clone(),
        )
    }

    pub fn verify_url(&self) -> &str {
        &self.verify_url
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, response: &str, remote_ip: Option<&str>) -> BedrockResult<bool> {
        let mut params = vec![("secret", self.secret.as_str()), ("response", response)];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip));
        }

        let unavailable = |e: reqwest::Error| {
            BedrockError::ServiceUnavailable(format!("reCAPTCHA verification failed: {e}"))
        };
        let body = self
            .client
            .post(&self.verify_url)
            .form(&params)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unavailable)?
            .text()
            .await
            .map_err(unavailable)?;

        let result = parse_verify_response(&body)?;
        if !result.success {
            debug!(error_codes = ?result.error_codes, "reCAPTCHA rejected token");
        }
        Ok(result.success)
    }
}

/// A verifier for tests: accepts [`TESTING_TOKEN`] and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestingVerifier;

#[async_trait]
impl CaptchaVerifier for TestingVerifier {
    async fn verify(&self, response: &str, _remote_ip: Option<&str>) -> BedrockResult<bool> {
        Ok(response == TESTING_TOKEN)
    }
}

/// Picks the verifier the settings call for: [`TestingVerifier`] when
/// `recaptcha_testing` is set, [`RecaptchaVerifier`] otherwise.
pub fn verifier_from_settings(settings: &Settings) -> Arc<dyn CaptchaVerifier> {
    if settings.recaptcha_testing {
        Arc::new(TestingVerifier)
    } else {
        Arc::new(RecaptchaVerifier::from_settings(settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verify_response() {
        let ok = parse_verify_response(r#"{"success": true, "hostname": "www.mozilla.org"}"#).unwrap();
        assert!(ok.success);
        assert!(ok.error_codes.is_empty());

        let rejected =
            parse_verify_response(r#"{"success": false, "error-codes": ["invalid-input-response"]}"#)
                .unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.error_codes, vec!["invalid-input-response".to_string()]);
    }

    #[test]
    fn test_parse_verify_response_garbage() {
        let err = parse_verify_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, BedrockError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_testing_verifier() {
        let v = TestingVerifier;
        assert!(v.verify(TESTING_TOKEN, None).await.unwrap());
        assert!(!v.verify("FAILED", Some("127.0.0.1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_recaptcha_verifier_unreachable() {
        let v = RecaptchaVerifier::new("secret", "http://127.0.0.1:9/siteverify");
        let err = v.verify("token", None).await.unwrap_err();
        assert!(matches!(err, BedrockError::ServiceUnavailable(_)));
    }

    #[test]
    fn test_verifier_from_settings() {
        let mut settings = Settings::default();
        settings.recaptcha_testing = true;
        assert!(format!("{:?}", verifier_from_settings(&settings)).contains("TestingVerifier"));

        settings.recaptcha_testing = false;
        settings.recaptcha_private_key = "do-not-print".to_string();
        let debug = format!("{:?}", verifier_from_settings(&settings));
        assert!(debug.contains("RecaptchaVerifier"));
        assert!(!debug.contains("do-not-print"));
    }
}
