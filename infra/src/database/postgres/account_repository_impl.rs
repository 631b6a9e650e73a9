//! Postgres implementation of AccountRepository over the `profiles` table

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use campus_core::errors::DomainError;
use campus_core::repositories::AccountRepository;

use crate::database::map_db_error;

pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_account_id_by_email(&self, email: &str) -> Result<Option<Uuid>, DomainError> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM profiles WHERE lower(email) = $1 LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn mark_email_verified(
        &self,
        email: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET email_verified = TRUE, email_verified_at = $2, updated_at = $2
            WHERE lower(email) = $1
            "#,
        )
        .bind(email)
        .bind(verified_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
