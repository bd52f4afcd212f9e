//! Integration tests for the newsletter signup form.

use bedrock_core::Settings;
use bedrock_forms::widgets::Attrs;
use bedrock_forms::{Form, Value};
use bedrock_http::QueryDict;
use bedrock_mozorg::NewsletterForm;
use bedrock_product_details::ProductDetails;

fn details() -> ProductDetails {
    ProductDetails::from_json(
        r#"{
            "de": {"English": "German", "native": "Deutsch"},
            "en-US": {"English": "English (US)", "native": "English (US)"},
            "es": {"English": "Spanish", "native": "Español (de España)"},
            "fr": {"English": "French", "native": "Français"}
        }"#,
    )
    .unwrap()
    .with_regions(
        "fr",
        [("fr", "France"), ("de", "Allemagne"), ("be", "Belgique")],
    )
    .with_regions("en-US", [("us", "United States"), ("fr", "France")])
}

fn form(locale: &str) -> NewsletterForm {
    NewsletterForm::new(locale, &details(), &Settings::default())
}

const COMPLETE: &str =
    "newsletter=mozilla-and-you&email=ami%40example.fr&fmt=T&privacy=on&country=be&language=fr";

#[tokio::test]
async fn test_complete_submission() {
    let mut form = form("fr");
    form.bind(&QueryDict::parse(COMPLETE));
    assert!(form.is_valid().await, "errors: {:?}", form.errors());

    let data = form.cleaned_data();
    assert_eq!(data.get("email"), Some(&Value::from("ami@example.fr")));
    assert_eq!(data.get("fmt"), Some(&Value::from("T")));
    assert_eq!(data.get("privacy"), Some(&Value::Bool(true)));
    assert_eq!(data.get("source_url"), Some(&Value::Null));
    assert_eq!(data.get("country"), Some(&Value::from("be")));
}

#[tokio::test]
async fn test_privacy_must_be_checked() {
    let mut form = form("fr");
    form.bind(&QueryDict::parse(&COMPLETE.replace("&privacy=on", "")));
    assert!(!form.is_valid().await);
    assert!(form.errors().contains_key("privacy"));
    assert_eq!(form.errors().len(), 1);
}

#[tokio::test]
async fn test_invalid_email_and_unknown_country() {
    let mut form = form("fr");
    let data = COMPLETE
        .replace("ami%40example.fr", "not-an-address")
        .replace("country=be", "country=us");
    form.bind(&QueryDict::parse(&data));
    assert!(!form.is_valid().await);
    assert!(form.errors().contains_key("email"));
    assert_eq!(
        form.errors().get("country"),
        Some(&vec![
            "Select a valid choice. us is not one of the available choices.".to_string()
        ])
    );
}

#[tokio::test]
async fn test_language_outside_configured_list_rejected() {
    let mut form = form("fr");
    form.bind(&QueryDict::parse(&COMPLETE.replace("language=fr", "language=ja")));
    assert!(!form.is_valid().await);
    assert!(form.errors().contains_key("language"));
}

#[tokio::test]
async fn test_source_url_gets_scheme() {
    let mut form = form("fr");
    form.bind(&QueryDict::parse(&format!(
        "{COMPLETE}&source_url=www.mozilla.org%2Ffr%2F"
    )));
    assert!(form.is_valid().await);
    assert_eq!(
        form.cleaned_data().get("source_url"),
        Some(&Value::from("http://www.mozilla.org/fr/"))
    );
}

#[test]
fn test_country_choices_sorted_with_guess() {
    let form = form("fr");
    let country = form.base().bound_field("country").unwrap();
    assert_eq!(country.value.as_deref(), Some("fr"));
    let html = country.render(&Attrs::new());
    assert_eq!(
        html.as_str(),
        concat!(
            r#"<select name="country" id="id_country">"#,
            r#"<option value="de">Allemagne</option>"#,
            r#"<option value="be">Belgique</option>"#,
            r#"<option value="fr" selected>France</option>"#,
            "</select>"
        )
    );
}

#[test]
fn test_regions_fall_back_to_en_us() {
    let form = form("de");
    let field = form.base().field("country").unwrap();
    let codes: Vec<&str> = field
        .field_type
        .choices()
        .iter()
        .map(|(code, _)| code.as_str())
        .collect();
    assert_eq!(codes, ["fr", "us"]);
}

#[test]
fn test_language_choices_stripped_and_sorted() {
    let form = form("es");
    let field = form.base().field("language").unwrap();
    assert_eq!(
        field.field_type.choices(),
        [
            ("de".to_string(), "Deutsch".to_string()),
            ("en-US".to_string(), "English".to_string()),
            ("es".to_string(), "Español".to_string()),
            ("fr".to_string(), "Français".to_string()),
        ]
    );
    let language = form.base().bound_field("language").unwrap();
    assert_eq!(language.value.as_deref(), Some("es"));
}

#[test]
fn test_format_radios_side_by_side() {
    let form = form("en-US");
    let html = form.base().bound_field("fmt").unwrap().render(&Attrs::new());
    assert_eq!(
        html.as_str(),
        concat!(
            r#"<label for="id_fmt_0"><input type="radio" name="fmt" value="H" checked id="id_fmt_0" /> HTML</label>"#,
            r#"<label for="id_fmt_1"><input type="radio" name="fmt" value="T" id="id_fmt_1" /> Text</label>"#
        )
    );
}

#[test]
fn test_email_and_privacy_markup() {
    let form = form("en-US");
    let email = form.base().bound_field("email").unwrap().render(&Attrs::new());
    assert_eq!(
        email.as_str(),
        r#"<input type="email" name="email" value="" id="id_email" required="true" />"#
    );
    let privacy = form.base().bound_field("privacy").unwrap().render(&Attrs::new());
    assert!(privacy
        .as_str()
        .starts_with(r#"<label for="id_privacy" class="privacy-check-label"><input type="checkbox" name="privacy" id="id_privacy" required="true" /> "#));
    assert!(privacy.as_str().ends_with("</span></label>"));
}

#[test]
fn test_bound_privacy_renders_checked() {
    let mut form = form("en-US");
    form.bind(&QueryDict::parse("privacy=on"));
    let privacy = form.base().bound_field("privacy").unwrap();
    assert_eq!(privacy.name, "privacy");
    assert!(privacy.render(&Attrs::new()).as_str().contains(" checked"));
}
