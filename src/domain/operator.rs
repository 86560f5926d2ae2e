use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An operator account as stored in the `operators` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OperatorRecord {
    pub operator_id: Uuid,
    pub login: String,
    pub password_hash: Option<String>,
    pub common_name: String,
    pub email: String,
    pub disabled: bool,
    /// Set for the duration of a login request only, never persisted.
    #[sqlx(skip)]
    pub remember_me: bool,
}

impl OperatorRecord {
    /// The stored hash, if there is a usable one.
    pub fn stored_password_hash(&self) -> Option<&str> {
        self.password_hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
    }
}

/// The operator identity bound to a session.
///
/// Exposed to handlers as a request extension once the operator logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedOperator {
    pub operator_id: Uuid,
    pub login: String,
    pub common_name: String,
    pub remember_me: bool,
}

impl From<&OperatorRecord> for AuthenticatedOperator {
    fn from(record: &OperatorRecord) -> Self {
        Self {
            operator_id: record.operator_id,
            login: record.login.clone(),
            common_name: record.common_name.clone(),
            remember_me: record.remember_me,
        }
    }
}
