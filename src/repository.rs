use async_trait::async_trait;
use sqlx::PgPool;

use crate::{domain::OperatorRecord, Result};

/// Read access to operator accounts.
#[async_trait]
pub trait OperatorRepository: Send + Sync {
    async fn operator_by_login(&self, login: &str) -> Result<Option<OperatorRecord>>;
}

#[derive(Debug, Clone)]
pub struct PgOperatorRepository {
    pool: PgPool,
}

impl PgOperatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OperatorRepository for PgOperatorRepository {
    #[tracing::instrument(name = "Get operator by login", skip(self))]
    async fn operator_by_login(&self, login: &str) -> Result<Option<OperatorRecord>> {
        let row: Option<OperatorRecord> = sqlx::query_as(
            r#"
            SELECT operator_id, login, password_hash, common_name, email, disabled
            FROM operators
            WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
