//! The newsletter signup and contribute forms.
//!
//! Both wrap a [`BaseForm`] holding their field schema and delegate the
//! [`Form`] plumbing to it. [`ContributeForm`] adds an async form-level
//! check that verifies the captcha token.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bedrock_captcha::{captcha_field, verifier_from_settings, verify_captcha, CaptchaVerifier};
use bedrock_core::logging::form_span;
use bedrock_core::{BedrockError, BedrockResult, Settings, SETTINGS};
use bedrock_forms::widgets::{Attrs, HiddenInput, RadioSelect, Select, Textarea};
use bedrock_forms::{BaseForm, Form, FormFieldDef, FormFieldType, Value};
use bedrock_http::QueryDict;
use bedrock_product_details::{ProductDetails, PRODUCT_DETAILS};
use tracing::{debug, info};

use crate::choices::{
    country_code_guess, get_lang_choices, get_region_choices, language_initial, FORMATS,
    NEWSLETTER_CHOICES,
};
use crate::email_contribute::interest_choices;
use crate::widgets::{EmailInput, PrivacyWidget, SideRadios};

/// Signup form for a single newsletter.
///
/// Fields, in order: `newsletter` (hidden), `email`, `fmt`, `privacy`,
/// `source_url`, `country`, `language`. Country and language choices depend
/// on the page locale.
///
/// ```
/// use bedrock_core::Settings;
/// use bedrock_forms::Form;
/// use bedrock_mozorg::NewsletterForm;
/// use bedrock_product_details::ProductDetails;
///
/// let form = NewsletterForm::new("fr", &ProductDetails::default(), &Settings::default());
/// let names: Vec<&str> = form.fields().iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(
///     names,
///     ["newsletter", "email", "fmt", "privacy", "source_url", "country", "language"]
/// );
/// ```
#[derive(Debug)]
pub struct NewsletterForm {
    base: BaseForm,
    locale: String,
}

impl NewsletterForm {
    pub fn new(locale: &str, details: &ProductDetails, settings: &Settings) -> Self {
        let span = form_span("newsletter", locale);
        let _guard = span.enter();

        let langs = &settings.newsletter_languages;
        let regions = get_region_choices(details, locale);
        let languages = get_lang_choices(details, langs);
        debug!(
            regions = regions.len(),
            languages = languages.len(),
            "building newsletter form"
        );

        let fields = vec![
            FormFieldDef::new("newsletter", FormFieldType::choice(NEWSLETTER_CHOICES))
                .widget(HiddenInput::new()),
            FormFieldDef::new("email", FormFieldType::Email)
                .widget(EmailInput::new().with_attrs([("required", "true")])),
            FormFieldDef::new("fmt", FormFieldType::choice(FORMATS))
                .widget(RadioSelect::default().with_renderer(SideRadios))
                .initial("H"),
            FormFieldDef::new("privacy", FormFieldType::Boolean).widget(PrivacyWidget::new()),
            FormFieldDef::new("source_url", FormFieldType::Url).required(false),
            FormFieldDef::new("country", FormFieldType::choice(regions))
                .initial(country_code_guess(locale)),
            FormFieldDef::new("language", FormFieldType::choice(languages))
                .initial(language_initial(locale, langs)),
        ];

        Self {
            base: BaseForm::new(fields),
            locale: locale.to_string(),
        }
    }

    /// Builds the form from the global settings and product details.
    ///
    /// # Errors
    ///
    /// Returns [`BedrockError::ImproperlyConfigured`] when either global has
    /// not been configured yet.
    pub fn for_locale(locale: &str) -> BedrockResult<Self> {
        let settings = SETTINGS.try_get().ok_or_else(|| {
            BedrockError::ImproperlyConfigured("settings have not been configured".to_string())
        })?;
        let details = PRODUCT_DETAILS.get()?;
        Ok(Self::new(locale, details, settings))
    }

    /// Preselects the newsletter the form subscribes to.
    #[must_use]
    pub fn with_newsletter(mut self, newsletter: &str) -> Self {
        self.base.set_initial("newsletter", newsletter);
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn base(&self) -> &BaseForm {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut BaseForm {
        &mut self.base
    }
}

#[async_trait]
impl Form for NewsletterForm {
    fn fields(&self) -> &[FormFieldDef] {
        self.base.fields()
    }

    fn initial(&self) -> &HashMap<String, Value> {
        self.base.initial()
    }

    fn prefix(&self) -> Option<&str> {
        self.base.prefix()
    }

    fn bind(&mut self, data: &QueryDict) {
        self.base.bind(data);
    }

    fn is_bound(&self) -> bool {
        self.base.is_bound()
    }

    async fn is_valid(&mut self) -> bool {
        let valid = self.base.is_valid().await;
        debug!(locale = %self.locale, valid, "newsletter form validated");
        valid
    }

    fn errors(&self) -> &HashMap<String, Vec<String>> {
        self.base.errors()
    }

    fn cleaned_data(&self) -> &HashMap<String, Value> {
        self.base.cleaned_data()
    }
}

/// The "get involved" form: an email address, an area of interest, free-text
/// comments and a captcha.
#[derive(Debug)]
pub struct ContributeForm {
    base: BaseForm,
    verifier: Arc<dyn CaptchaVerifier>,
    remote_ip: Option<String>,
}

impl ContributeForm {
    pub fn new(verifier: Arc<dyn CaptchaVerifier>, public_key: &str) -> Self {
        let captcha_attrs: Attrs = [("theme".to_string(), "clean".to_string())].into();

        let fields = vec![
            FormFieldDef::new("email", FormFieldType::Email)
                .widget(EmailInput::new().with_attrs([("required", "true")])),
            FormFieldDef::new("privacy", FormFieldType::Boolean).widget(PrivacyWidget::new()),
            FormFieldDef::new("newsletter", FormFieldType::Boolean).required(false),
            FormFieldDef::new("interest", FormFieldType::choice(interest_choices()))
                .widget(Select::default().with_attrs([("required", "true")])),
            FormFieldDef::new("comments", FormFieldType::text()).widget(
                Textarea::new().with_attrs([("required", "true"), ("rows", ""), ("cols", "")]),
            ),
            captcha_field("captcha", public_key, captcha_attrs),
        ];

        Self {
            base: BaseForm::new(fields),
            verifier,
            remote_ip: None,
        }
    }

    /// Builds the form with the verifier and site key from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            verifier_from_settings(settings),
            &settings.recaptcha_public_key,
        )
    }

    /// Sets the client address passed along with the captcha token.
    #[must_use]
    pub fn with_remote_ip(mut self, remote_ip: impl Into<String>) -> Self {
        self.remote_ip = Some(remote_ip.into());
        self
    }

    pub fn base(&self) -> &BaseForm {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut BaseForm {
        &mut self.base
    }
}

#[async_trait]
impl Form for ContributeForm {
    fn fields(&self) -> &[FormFieldDef] {
        self.base.fields()
    }

    fn initial(&self) -> &HashMap<String, Value> {
        self.base.initial()
    }

    fn prefix(&self) -> Option<&str> {
        self.base.prefix()
    }

    fn bind(&mut self, data: &QueryDict) {
        self.base.bind(data);
    }

    fn is_bound(&self) -> bool {
        self.base.is_bound()
    }

    async fn is_valid(&mut self) -> bool {
        if !self.base.is_bound() {
            return false;
        }
        self.base.clean_fields();
        if let Err(errors) = self.clean().await {
            self.base.merge_errors(errors);
        }
        let valid = self.base.errors().is_empty();
        if !valid {
            info!(
                fields = ?self.base.errors().keys().collect::<Vec<_>>(),
                "contribute form rejected"
            );
        }
        valid
    }

    fn errors(&self) -> &HashMap<String, Vec<String>> {
        self.base.errors()
    }

    fn cleaned_data(&self) -> &HashMap<String, Value> {
        self.base.cleaned_data()
    }

    async fn clean(&self) -> Result<(), HashMap<String, Vec<String>>> {
        // A missing token already failed field-level validation.
        let Some(token) = self.base.cleaned_data().get("captcha").and_then(Value::as_str) else {
            return Ok(());
        };
        verify_captcha(self.verifier.as_ref(), token, self.remote_ip.as_deref())
            .await
            .map_err(|msg| HashMap::from([("captcha".to_string(), vec![msg])]))
    }
}
