use axum::{debug_handler, extract::State, response::Response, Extension};
use serde_json::json;

use crate::{domain::AuthenticatedOperator, i18n::Locale, startup::AppState, Result};

use super::format;

/// Landing page of a logged-in operator. Routed behind
/// [`crate::middleware::auth::require_operator`].
#[debug_handler]
pub async fn operator_home(
    Extension(operator): Extension<AuthenticatedOperator>,
    locale: Locale,
    State(state): State<AppState>,
) -> Result<Response> {
    let locales = &state.locales;
    format::render().view(
        &state.tera_engine,
        "operator/home.html",
        json!({
            "operator": operator,
            "title": locales.translate(locale.as_str(), "page_operator_home.title"),
            "header_title": locales.translate(locale.as_str(), "app.title"),
            "logout": locales.translate(locale.as_str(), "page_operator_home.logout"),
            "locale_links": locales.locale_links(locale.as_str(), None),
        }),
    )
}
