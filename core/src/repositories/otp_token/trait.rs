//! Token repository trait defining the interface for OTP token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{OtpPurpose, OtpToken};
use crate::domain::value_objects::AttemptOutcome;
use crate::errors::DomainError;

/// Repository trait for OtpToken persistence operations
///
/// The token table is the only shared mutable resource in the OTP lifecycle.
/// Issuance inserts, verification updates, resend supersedes then inserts,
/// and the sweep deletes.
///
/// # Atomicity
/// `verify_and_consume` must look up, check and update the token as one
/// indivisible step. Two concurrent attempts against the same token must
/// serialize so no attempt is lost and no code succeeds twice.
#[async_trait]
pub trait OtpTokenRepository: Send + Sync {
    /// Persist a freshly issued token
    ///
    /// # Returns
    /// * `Ok(OtpToken)` - The stored token
    /// * `Err(DomainError)` - Write failed
    async fn insert(&self, token: OtpToken) -> Result<OtpToken, DomainError>;

    /// Atomically apply one verification attempt
    ///
    /// Selects the most recent unused, unexpired token for (email, purpose)
    /// and runs [`OtpToken::apply_attempt`] on it under an exclusive lock,
    /// persisting the result before returning.
    ///
    /// # Arguments
    /// * `email` - Normalized address
    /// * `purpose` - Flow the code must belong to
    /// * `code` - Submitted code, already format-checked
    /// * `now` - Time the attempt is evaluated at
    ///
    /// # Returns
    /// * `Ok(AttemptOutcome)` - Business result of the attempt
    /// * `Err(DomainError)` - Store unavailable; nothing was changed
    async fn verify_and_consume(
        &self,
        email: &str,
        purpose: OtpPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, DomainError>;

    /// Mark every unused token for (email, purpose) as used
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of tokens superseded
    async fn supersede_unused(
        &self,
        email: &str,
        purpose: OtpPurpose,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError>;

    /// Delete every token whose `expires_at` is not after `now`
    ///
    /// Never touches an unexpired token, so repeated calls converge.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Most recently created token for (email, purpose), in any state
    async fn find_latest(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpToken>, DomainError>;
}
