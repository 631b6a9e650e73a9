//! Account lookups needed by the OTP flows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::DomainError;

/// Read and flag access to the identity/profile store
///
/// Accounts themselves are owned by the external identity provider; this
/// layer only resolves addresses and records email verification.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Resolve a normalized email to the owning account id
    ///
    /// # Returns
    /// * `Ok(Some(Uuid))` - Account exists
    /// * `Ok(None)` - No account for this address
    /// * `Err(DomainError)` - Store error
    async fn find_account_id_by_email(&self, email: &str) -> Result<Option<Uuid>, DomainError>;

    /// Set the email-verified flag and timestamp on the profile
    ///
    /// # Returns
    /// * `Ok(true)` - A profile was updated
    /// * `Ok(false)` - No profile matched the address
    async fn mark_email_verified(
        &self,
        email: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
