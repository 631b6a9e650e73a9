//! Postgres implementation of OtpTokenRepository
//!
//! Verification runs inside one transaction that locks the selected row
//! with `FOR UPDATE`, applies the attempt in memory and writes it back
//! before committing. Concurrent attempts on the same token queue on the
//! row lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use campus_core::domain::entities::{OtpPurpose, OtpToken};
use campus_core::domain::value_objects::AttemptOutcome;
use campus_core::errors::DomainError;
use campus_core::repositories::OtpTokenRepository;
use campus_shared::validation::mask_email;

use crate::database::map_db_error;

const TOKEN_COLUMNS: &str = "id, user_id, email, code, purpose, attempts, max_attempts, \
     is_used, verified_at, expires_at, created_at, updated_at";

/// Postgres-backed token repository
pub struct PgOtpTokenRepository {
    pool: PgPool,
}

impl PgOtpTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &PgRow) -> Result<OtpToken, DomainError> {
        let purpose: String = row.try_get("purpose").map_err(map_db_error)?;
        let code: String = row.try_get("code").map_err(map_db_error)?;

        Ok(OtpToken {
            id: row.try_get("id").map_err(map_db_error)?,
            user_id: row.try_get::<Option<Uuid>, _>("user_id").map_err(map_db_error)?,
            email: row.try_get("email").map_err(map_db_error)?,
            code: code.trim_end().to_string(),
            purpose: purpose
                .parse::<OtpPurpose>()
                .map_err(|message| DomainError::Internal { message })?,
            attempts: row.try_get("attempts").map_err(map_db_error)?,
            max_attempts: row.try_get("max_attempts").map_err(map_db_error)?,
            is_used: row.try_get("is_used").map_err(map_db_error)?,
            verified_at: row.try_get("verified_at").map_err(map_db_error)?,
            expires_at: row.try_get("expires_at").map_err(map_db_error)?,
            created_at: row.try_get("created_at").map_err(map_db_error)?,
            updated_at: row.try_get("updated_at").map_err(map_db_error)?,
        })
    }
}

#[async_trait]
impl OtpTokenRepository for PgOtpTokenRepository {
    async fn insert(&self, token: OtpToken) -> Result<OtpToken, DomainError> {
        let query = r#"
            INSERT INTO otp_tokens (
                id, user_id, email, code, purpose, attempts, max_attempts,
                is_used, verified_at, expires_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#;

        sqlx::query(query)
            .bind(token.id)
            .bind(token.user_id)
            .bind(&token.email)
            .bind(&token.code)
            .bind(token.purpose.as_str())
            .bind(token.attempts)
            .bind(token.max_attempts)
            .bind(token.is_used)
            .bind(token.verified_at)
            .bind(token.expires_at)
            .bind(token.created_at)
            .bind(token.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(&token.email),
                    error = %e,
                    "Failed to insert OTP token"
                );
                map_db_error(e)
            })?;

        Ok(token)
    }

    async fn verify_and_consume(
        &self,
        email: &str,
        purpose: OtpPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let select = format!(
            r#"
            SELECT {TOKEN_COLUMNS}
            FROM otp_tokens
            WHERE email = $1 AND purpose = $2 AND is_used = FALSE AND expires_at > $3
            ORDER BY created_at DESC
            LIMIT 1
            FOR UPDATE
            "#
        );

        let row = sqlx::query(&select)
            .bind(email)
            .bind(purpose.as_str())
            .bind(now)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(map_db_error)?;
            debug!(email = %mask_email(email), purpose = %purpose, "No live OTP token");
            return Ok(AttemptOutcome::NoActiveToken);
        };

        let mut token = Self::row_to_token(&row)?;
        let outcome = token.apply_attempt(code, now);

        if matches!(
            outcome,
            AttemptOutcome::Mismatch { .. } | AttemptOutcome::Verified { .. }
        ) {
            sqlx::query(
                r#"
                UPDATE otp_tokens
                SET attempts = $2, is_used = $3, verified_at = $4, updated_at = $5
                WHERE id = $1
                "#,
            )
            .bind(token.id)
            .bind(token.attempts)
            .bind(token.is_used)
            .bind(token.verified_at)
            .bind(token.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(|e| {
            error!(
                email = %mask_email(email),
                error = %e,
                "Failed to commit OTP verification"
            );
            map_db_error(e)
        })?;

        Ok(outcome)
    }

    async fn supersede_unused(
        &self,
        email: &str,
        purpose: OtpPurpose,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE otp_tokens
            SET is_used = TRUE, updated_at = $3
            WHERE email = $1 AND purpose = $2 AND is_used = FALSE
            "#,
        )
        .bind(email)
        .bind(purpose.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otp_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    async fn find_latest(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpToken>, DomainError> {
        let select = format!(
            r#"
            SELECT {TOKEN_COLUMNS}
            FROM otp_tokens
            WHERE email = $1 AND purpose = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#
        );

        let row = sqlx::query(&select)
            .bind(email)
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.as_ref().map(Self::row_to_token).transpose()
    }
}
