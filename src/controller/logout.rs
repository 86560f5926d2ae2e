use axum::{debug_handler, extract::State, response::Response, Extension};
use tower_sessions::Session;

use crate::{controller::format, domain::AuthenticatedOperator, startup::AppState, Result};

#[debug_handler]
pub async fn operator_logout(
    operator: Option<Extension<AuthenticatedOperator>>,
    session: Session,
    State(state): State<AppState>,
) -> Result<Response> {
    if let Some(Extension(operator)) = operator {
        tracing::info!(operator_id = %operator.operator_id, "operator logged out");
        session.flush().await?;
    }
    format::render().redirect(&state.uri_for_path("/operator/login"))
}
