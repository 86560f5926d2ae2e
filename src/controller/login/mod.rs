mod post;
use axum::{
    debug_handler,
    extract::{Query, State},
    response::Response,
    Extension,
};
pub use post::*;

use crate::{
    domain::{AuthenticatedOperator, LoginPage, LoginQuery, PrefillLogin},
    i18n::Locale,
    startup::AppState,
    Result,
};

use super::format;

#[debug_handler]
pub async fn login_form(
    operator: Option<Extension<AuthenticatedOperator>>,
    locale: Locale,
    query: Option<Query<LoginQuery>>,
    State(state): State<AppState>,
) -> Result<Response> {
    let query_login = query.and_then(|Query(query)| query.login);
    show_form(
        &state,
        &locale,
        operator.is_some(),
        PrefillLogin::resolve(None, query_login.as_deref()),
        Vec::new(),
    )
}

/// Renders the login form, or sends an already logged-in operator home.
///
/// Shared by both login handlers so that a failed submission re-renders the
/// same page with `errors` and the entered login.
#[tracing::instrument(name = "Show login form", skip(state, locale, prefill), fields(locale = %locale.as_str()))]
pub(crate) fn show_form(
    state: &AppState,
    locale: &Locale,
    authenticated: bool,
    prefill: Option<PrefillLogin>,
    errors: Vec<String>,
) -> Result<Response> {
    if authenticated {
        return format::render().redirect(&state.uri_for_path("/operator"));
    }

    let locales = &state.locales;
    let form_login = prefill.map(PrefillLogin::into_inner);
    // Only logins the query would accept again survive a locale switch.
    let linked_login = form_login
        .as_deref()
        .filter(|login| PrefillLogin::from_query(login).is_some());
    let page = LoginPage {
        form_is_remember: true,
        version: state.version.clone(),
        errors,
        locale_links: locales.locale_links(locale.as_str(), linked_login),
        form_login,
        title: locales.translate(locale.as_str(), "page_login.title"),
        header_title: locales.translate(locale.as_str(), "app.title"),
        show_small_login: false,
        fixedwrap: true,
    };
    format::render().view(&state.tera_engine, "login.html", page)
}
