use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header, request::Parts},
};
use serde::{Deserialize, Serialize};

use crate::startup::AppState;

/// Key holding each catalog's own display name, e.g. `Français`.
const LANGUAGE_NAME: &str = "language.name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleLink {
    pub code: String,
    pub name: String,
    pub url: String,
    pub current: bool,
}

/// The locales compiled in from `assets/locales` and the one used when a
/// request does not ask for any of them.
#[derive(Debug, Clone)]
pub struct Locales {
    default_locale: String,
    available: Vec<String>,
}

impl Locales {
    pub fn new(default_locale: &str) -> Self {
        let mut available: Vec<String> = rust_i18n::available_locales!()
            .into_iter()
            .map(str::to_string)
            .collect();
        available.sort();

        if !available.iter().any(|code| code == default_locale) {
            tracing::warn!(
                locale = default_locale,
                "default locale has no catalog, messages fall back to `en`"
            );
        }
        Self {
            default_locale: default_locale.to_string(),
            available,
        }
    }

    pub fn is_available(&self, code: &str) -> bool {
        self.available.iter().any(|available| available == code)
    }

    /// Looks `key` up in `locale`, falling back to the `en` catalog.
    pub fn translate(&self, locale: &str, key: &str) -> String {
        t!(key, locale = locale).to_string()
    }

    /// One link per available locale. A `login` that is safe to put back in
    /// the query string is kept so the form stays prefilled.
    pub fn locale_links(&self, current: &str, login: Option<&str>) -> Vec<LocaleLink> {
        self.available
            .iter()
            .map(|code| {
                let url = match login {
                    Some(login) => format!("?locale={}&login={}", code, login),
                    None => format!("?locale={}", code),
                };
                LocaleLink {
                    code: code.clone(),
                    name: self.translate(code, LANGUAGE_NAME),
                    url,
                    current: code == current,
                }
            })
            .collect()
    }

    /// Picks the locale for a request: an explicit `?locale=` first, then the
    /// `Accept-Language` header, then the default.
    pub fn negotiate(&self, requested: Option<&str>, accept_language: Option<&str>) -> String {
        if let Some(code) = requested.filter(|code| self.is_available(code)) {
            return code.to_string();
        }

        accept_language
            .into_iter()
            .flat_map(|header| header.split(','))
            .filter_map(|tag| tag.split(';').next())
            .map(str::trim)
            .find_map(|tag| {
                let primary = tag.split('-').next().unwrap_or(tag);
                [tag, primary]
                    .into_iter()
                    .find(|code| self.is_available(code))
            })
            .map(str::to_string)
            .unwrap_or_else(|| self.default_locale.clone())
    }
}

/// The negotiated locale of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let requested = Query::<LocaleQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.locale);
        let accept_language = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        Ok(Self(
            state
                .locales
                .negotiate(requested.as_deref(), accept_language),
        ))
    }
}
