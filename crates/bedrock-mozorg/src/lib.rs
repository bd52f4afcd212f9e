//! # bedrock-mozorg
//!
//! Forms for the mozorg pages: newsletter signup and "get involved"
//! contribute submissions, the choice lists they offer, and the widgets that
//! give them their page-specific markup.
//!
//! ## Modules
//!
//! - [`choices`] - Formats, newsletters, and locale-aware language choices
//! - [`email_contribute`] - Areas of interest offered on the contribute page
//! - [`widgets`] - Side-by-side radios, the privacy checkbox, email inputs
//! - [`forms`] - [`NewsletterForm`] and [`ContributeForm`]

pub mod choices;
pub mod email_contribute;
pub mod forms;
pub mod widgets;

pub use choices::{get_lang_choices, strip_parenthetical};
pub use forms::{ContributeForm, NewsletterForm};
pub use widgets::{EmailInput, PrivacyWidget, SideRadios};
