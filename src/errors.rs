use axum::response::{IntoResponse, Response};
use hyper::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("event listener `{listener}` failed: {reason}")]
    Listener { listener: String, reason: String },

    #[error(transparent)]
    Tera(#[from] tera::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Http(#[from] axum::http::Error),

    #[error(transparent)]
    Session(#[from] tower_sessions::session::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

}

impl Error {
    pub fn string(s: &str) -> Self {
        Self::Message(s.to_string())
    }

    pub fn listener(listener: &str, reason: impl ToString) -> Self {
        Self::Listener {
            listener: listener.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error.cause_chain = ?self, error.message = %self, "request failed");
        // Details stay in the log.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::INTERNAL_SERVER_ERROR
                .canonical_reason()
                .unwrap_or_default(),
        )
            .into_response()
    }
}
