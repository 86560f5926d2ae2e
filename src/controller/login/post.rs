use axum::{
    debug_handler,
    extract::{Query, State},
    response::Response,
    Extension, Form,
};
use tower_sessions::Session;

use crate::{
    authentication::{validate_credentials, Credentials, LoginOutcome},
    controller::format,
    domain::{AuthenticatedOperator, LoginForm, LoginQuery, PrefillLogin},
    events::{Event, OperatorLoginEvent},
    i18n::Locale,
    middleware::auth::{BindOperator, BACKPATH_KEY},
    startup::AppState,
    Result,
};

use super::show_form;

/// Handles the login form submission.
///
/// On success the operator is handed to the session layer through
/// [`BindOperator`] and `operatorLogin` is dispatched before redirecting.
/// Bad credentials never produce an error response: the form is rendered
/// again with a single message that does not say which field was wrong.
#[debug_handler]
pub async fn submit_login(
    operator: Option<Extension<AuthenticatedOperator>>,
    session: Session,
    locale: Locale,
    query: Option<Query<LoginQuery>>,
    State(state): State<AppState>,
    Form(params): Form<LoginForm>,
) -> Result<Response> {
    let remember = params.remember();
    let outcome = match params.login.clone() {
        Some(login) => {
            let credentials = Credentials {
                login,
                password: params.password,
            };
            validate_credentials(credentials, state.operators.as_ref()).await?
        }
        None => LoginOutcome::InvalidCredentials,
    };

    let error_key = match outcome {
        LoginOutcome::Authenticated(mut operator) => {
            if remember {
                operator.remember_me = true;
            }

            let target = match session.get::<String>(BACKPATH_KEY).await? {
                Some(backpath) => backpath,
                None => state.uri_for_path("/operator"),
            };

            state
                .dispatcher
                .dispatch(&Event::OperatorLogin(OperatorLoginEvent {
                    operator: operator.clone(),
                    remember,
                }))?;

            return format::render()
                .extension(BindOperator(operator))
                .redirect(&target);
        }
        LoginOutcome::Disabled => "page_login.operator.disabled",
        LoginOutcome::InvalidCredentials => "page_login.error",
    };

    let errors = vec![state.locales.translate(locale.as_str(), error_key)];
    let query_login = query.and_then(|Query(query)| query.login);
    show_form(
        &state,
        &locale,
        operator.is_some(),
        PrefillLogin::resolve(params.login, query_login.as_deref()),
        errors,
    )
}
