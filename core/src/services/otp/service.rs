//! Main OTP service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use campus_shared::validation::{is_valid_otp_code, mask_email, normalize_email};

use crate::domain::entities::{OtpPurpose, OtpToken};
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::{AccountRepository, OtpTokenRepository};

use super::clock::{Clock, SystemClock};
use super::config::OtpServiceConfig;
use super::types::VerifyCodeResult;

/// Service owning the OTP token lifecycle
pub struct OtpService<R: OtpTokenRepository, A: AccountRepository> {
    /// Token store
    tokens: Arc<R>,
    /// Profile store, used for the email-verified side effect
    accounts: Arc<A>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<R: OtpTokenRepository, A: AccountRepository> OtpService<R, A> {
    /// Create a new OTP service using the wall clock
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token repository implementation
    /// * `accounts` - Account repository implementation
    /// * `config` - Service configuration
    pub fn new(tokens: Arc<R>, accounts: Arc<A>, config: OtpServiceConfig) -> Self {
        Self {
            tokens,
            accounts,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issue a new token for (email, purpose)
    ///
    /// Every call inserts an independent row. Earlier tokens for the same
    /// pair stay live; use [`OtpService::resend`] to supersede them.
    ///
    /// # Returns
    ///
    /// * `Some(OtpToken)` - The stored token
    /// * `None` - The write failed; the failure is logged here
    pub async fn issue(
        &self,
        email: &str,
        purpose: OtpPurpose,
        user_id: Option<Uuid>,
    ) -> Option<OtpToken> {
        let token = OtpToken::issue_at(
            email,
            purpose,
            user_id,
            self.clock.now(),
            self.config.code_expiration_minutes(),
            self.config.max_attempts(),
        );
        let masked = mask_email(&token.email);

        match self.tokens.insert(token).await {
            Ok(token) => {
                tracing::info!(
                    email = %masked,
                    purpose = %purpose,
                    token_id = %token.id,
                    expires_at = %token.expires_at,
                    event = "otp_issued",
                    "Issued one-time password"
                );
                Some(token)
            }
            Err(e) => {
                tracing::error!(
                    email = %masked,
                    purpose = %purpose,
                    error = %e,
                    event = "otp_issue_failed",
                    "Failed to store one-time password"
                );
                None
            }
        }
    }

    /// Verify a submitted code
    ///
    /// The lookup, attempt accounting and consumption happen in one atomic
    /// repository call. On a successful `email_verification` the owning
    /// profile is flagged as verified; that update is best-effort and never
    /// undoes the consumed token.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult)` - Business outcome, `success` false for any
    ///   rejected code
    /// * `Err(DomainError)` - Malformed code, or the token store failed
    pub async fn verify(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> DomainResult<VerifyCodeResult> {
        if !is_valid_otp_code(code) {
            return Err(ValidationError::InvalidCodeFormat.into());
        }

        let email = normalize_email(email);
        let masked = mask_email(&email);
        let now = self.clock.now();

        let outcome = self
            .tokens
            .verify_and_consume(&email, purpose, code, now)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked,
                    purpose = %purpose,
                    error = %e,
                    event = "otp_verification_error",
                    "Token store error during verification"
                );
                e
            })?;

        let result = VerifyCodeResult::from(outcome);

        if result.success {
            tracing::info!(
                email = %masked,
                purpose = %purpose,
                event = "otp_verified_success",
                "One-time password verified"
            );
            if purpose == OtpPurpose::EmailVerification {
                self.mark_email_verified(&email, now).await;
            }
        } else {
            tracing::warn!(
                email = %masked,
                purpose = %purpose,
                remaining_attempts = ?result.remaining_attempts,
                reason = %result.message,
                event = "otp_verification_failed",
                "One-time password rejected"
            );
        }

        Ok(result)
    }

    /// Supersede every unused token for (email, purpose), then issue a new one
    ///
    /// The two writes are not atomic with each other. If the supersede write
    /// fails nothing is issued.
    pub async fn resend(
        &self,
        email: &str,
        purpose: OtpPurpose,
        user_id: Option<Uuid>,
    ) -> Option<OtpToken> {
        let normalized = normalize_email(email);
        let masked = mask_email(&normalized);

        match self
            .tokens
            .supersede_unused(&normalized, purpose, self.clock.now())
            .await
        {
            Ok(superseded) => {
                tracing::info!(
                    email = %masked,
                    purpose = %purpose,
                    superseded = superseded,
                    event = "otp_superseded",
                    "Superseded previous one-time passwords"
                );
            }
            Err(e) => {
                tracing::error!(
                    email = %masked,
                    purpose = %purpose,
                    error = %e,
                    event = "otp_supersede_failed",
                    "Failed to supersede previous one-time passwords"
                );
                return None;
            }
        }

        self.issue(&normalized, purpose, user_id).await
    }

    /// Delete expired tokens
    ///
    /// Returns `false` only when the store reported an error. Unexpired
    /// tokens are never touched.
    pub async fn cleanup_expired(&self) -> bool {
        match self.tokens.delete_expired(self.clock.now()).await {
            Ok(deleted) => {
                tracing::info!(
                    deleted = deleted,
                    event = "otp_cleanup",
                    "Deleted expired one-time passwords"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event = "otp_cleanup_failed",
                    "Failed to delete expired one-time passwords"
                );
                false
            }
        }
    }

    async fn mark_email_verified(&self, email: &str, now: DateTime<Utc>) {
        match self.accounts.mark_email_verified(email, now).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(
                    email = %mask_email(email),
                    event = "email_verified_no_profile",
                    "Verified email has no matching profile"
                );
            }
            Err(e) => {
                tracing::warn!(
                    email = %mask_email(email),
                    error = %e,
                    event = "email_verified_flag_failed",
                    "Failed to record email verification on profile"
                );
            }
        }
    }
}
