use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use time::Duration;
use tower_sessions::{Expiry, Session};

use crate::{
    controller::render,
    domain::{AuthenticatedOperator, OperatorRecord},
    startup::AppState,
    Result,
};

pub const OPERATOR_KEY: &str = "operator";
pub const BACKPATH_KEY: &str = "backpath";

/// Response extension asking [`bind_operator`] to bind this operator to the
/// session.
#[derive(Debug, Clone)]
pub struct BindOperator(pub OperatorRecord);

/// Exposes the session's operator as an [`AuthenticatedOperator`] request
/// extension and binds operators that just logged in.
pub async fn bind_operator(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(operator) = session.get::<AuthenticatedOperator>(OPERATOR_KEY).await? {
        request.extensions_mut().insert(operator);
    }

    let mut response = next.run(request).await;

    if let Some(BindOperator(record)) = response.extensions_mut().remove::<BindOperator>() {
        let operator = AuthenticatedOperator::from(&record);
        session.cycle_id().await?;
        if operator.remember_me {
            session.set_expiry(Some(Expiry::OnInactivity(Duration::days(
                state.remember_days,
            ))));
        }
        session.insert(OPERATOR_KEY, &operator).await?;
        tracing::debug!(operator_id = %operator.operator_id, "operator bound to session");
    }
    Ok(response)
}

/// Lets only logged-in operators through. Anybody else is sent to the login
/// form and comes back to the requested page afterwards.
pub async fn require_operator(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response> {
    if request.extensions().get::<AuthenticatedOperator>().is_some() {
        return Ok(next.run(request).await);
    }

    let requested = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/operator");
    session
        .insert(BACKPATH_KEY, state.uri_for_path(requested))
        .await?;
    render().redirect(&state.uri_for_path("/operator/login"))
}
