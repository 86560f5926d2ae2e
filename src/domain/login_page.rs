use serde::Serialize;

use crate::i18n::LocaleLink;

/// Everything `login.html` renders.
#[derive(Debug, Clone, Serialize)]
pub struct LoginPage {
    pub form_is_remember: bool,
    pub version: String,
    pub errors: Vec<String>,
    pub form_login: Option<String>,
    pub locale_links: Vec<LocaleLink>,
    pub title: String,
    pub header_title: String,
    pub show_small_login: bool,
    pub fixedwrap: bool,
}
