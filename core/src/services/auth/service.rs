//! Composite flow service implementation

use std::sync::Arc;
use uuid::Uuid;

use campus_shared::validation::{is_valid_email, is_valid_otp_code, mask_email, normalize_email};
use campus_shared::OtpResponse;

use crate::domain::entities::{OtpPurpose, OtpToken};
use crate::errors::{DomainError, ValidationError};
use crate::repositories::{AccountRepository, OtpTokenRepository};
use crate::services::otp::OtpService;

use super::config::AuthFlowConfig;
use super::disclosure::{send_response, SendOutcome};
use super::error::FlowError;
use super::traits::{EmailServiceTrait, IdentityProviderTrait, OtpEmail};

pub const PASSWORD_UPDATED: &str = "Password updated successfully";

/// Service behind the send, resend, verify and reset-password endpoints
pub struct AuthFlowService<R, A, E, I>
where
    R: OtpTokenRepository,
    A: AccountRepository,
    E: EmailServiceTrait + ?Sized,
    I: IdentityProviderTrait + ?Sized,
{
    /// OTP lifecycle
    otp_service: Arc<OtpService<R, A>>,
    /// Account lookup by email
    accounts: Arc<A>,
    /// Email delivery
    email_service: Arc<E>,
    /// Password updates
    identity_provider: Arc<I>,
    config: AuthFlowConfig,
}

#[derive(Clone, Copy)]
enum SendMode {
    Issue,
    Resend,
}

impl<R, A, E, I> AuthFlowService<R, A, E, I>
where
    R: OtpTokenRepository,
    A: AccountRepository,
    E: EmailServiceTrait + ?Sized + 'static,
    I: IdentityProviderTrait + ?Sized,
{
    /// Create a new flow service
    ///
    /// # Arguments
    ///
    /// * `otp_service` - OTP lifecycle service
    /// * `accounts` - Account repository, shared with the OTP service
    /// * `email_service` - Email delivery collaborator
    /// * `identity_provider` - Identity provider for password updates
    /// * `config` - Flow configuration
    pub fn new(
        otp_service: Arc<OtpService<R, A>>,
        accounts: Arc<A>,
        email_service: Arc<E>,
        identity_provider: Arc<I>,
        config: AuthFlowConfig,
    ) -> Self {
        Self {
            otp_service,
            accounts,
            email_service,
            identity_provider,
            config,
        }
    }

    pub fn otp_service(&self) -> &Arc<OtpService<R, A>> {
        &self.otp_service
    }

    /// Issue a code and email it
    ///
    /// The response is the same for every outcome except malformed input and
    /// an unreachable account store.
    pub async fn send_code(
        &self,
        email: &str,
        purpose: OtpPurpose,
        user_name: Option<&str>,
    ) -> Result<OtpResponse, FlowError> {
        self.deliver(email, purpose, user_name, SendMode::Issue).await
    }

    /// Supersede outstanding codes, then issue and email a fresh one
    pub async fn resend_code(
        &self,
        email: &str,
        purpose: OtpPurpose,
        user_name: Option<&str>,
    ) -> Result<OtpResponse, FlowError> {
        self.deliver(email, purpose, user_name, SendMode::Resend).await
    }

    /// Verify a code for any purpose
    pub async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<OtpResponse, FlowError> {
        let email = Self::validated_email(email)?;
        if !is_valid_otp_code(code) {
            return Err(ValidationError::InvalidCodeFormat.into());
        }

        let result = self
            .otp_service
            .verify(&email, code, purpose)
            .await
            .map_err(Self::map_domain_error)?;

        let mut response = if result.success {
            OtpResponse::ok(result.message)
        } else {
            OtpResponse::fail(result.message)
        };
        if let Some(user_id) = result.user_id {
            response = response.with_user_id(user_id);
        }
        Ok(response)
    }

    /// Two-phase password reset
    ///
    /// Phase one consumes a `password_reset` code. Only after it succeeds is
    /// the identity provider asked to change the password. A phase-two
    /// failure cannot reuse the consumed code, so the caller is told to
    /// request a new one.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<OtpResponse, FlowError> {
        let email = Self::validated_email(email)?;
        if !is_valid_otp_code(code) {
            return Err(ValidationError::InvalidCodeFormat.into());
        }
        if new_password.chars().count() < self.config.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        let verified = self
            .otp_service
            .verify(&email, code, OtpPurpose::PasswordReset)
            .await
            .map_err(Self::map_domain_error)?;

        if !verified.success {
            return Ok(OtpResponse::fail(verified.message));
        }

        let user_id = match verified.user_id {
            Some(id) => id,
            None => self.resolve_account_after_consume(&email).await?,
        };

        if let Err(e) = self
            .identity_provider
            .update_password(user_id, new_password)
            .await
        {
            tracing::error!(
                email = %mask_email(&email),
                user_id = %user_id,
                error = %e,
                event = "password_update_failed",
                "Identity provider rejected password update after code was consumed"
            );
            return Err(FlowError::PasswordUpdateFailed);
        }

        tracing::info!(
            email = %mask_email(&email),
            user_id = %user_id,
            event = "password_reset_completed",
            "Password reset completed"
        );

        Ok(OtpResponse::ok(PASSWORD_UPDATED).with_user_id(user_id))
    }

    async fn deliver(
        &self,
        email: &str,
        purpose: OtpPurpose,
        user_name: Option<&str>,
        mode: SendMode,
    ) -> Result<OtpResponse, FlowError> {
        let email = Self::validated_email(email)?;
        let fallback_expiry = self.otp_service.now() + self.otp_service.config().expiration();

        let account_id = self
            .accounts
            .find_account_id_by_email(&email)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "account_lookup_failed",
                    "Account store error before issuing code"
                );
                FlowError::Unavailable
            })?;

        let Some(account_id) = account_id else {
            return Ok(send_response(&email, purpose, SendOutcome::NoAccount, fallback_expiry));
        };

        let token = match mode {
            SendMode::Issue => self.otp_service.issue(&email, purpose, Some(account_id)).await,
            SendMode::Resend => self.otp_service.resend(&email, purpose, Some(account_id)).await,
        };

        let Some(token) = token else {
            return Ok(send_response(&email, purpose, SendOutcome::NotIssued, fallback_expiry));
        };

        let message = Self::otp_email(&token, user_name);
        let outcome = if self.config.background_delivery {
            self.spawn_email(message);
            SendOutcome::Queued
        } else if self.email_service.send_otp_email(&message).await {
            SendOutcome::Delivered
        } else {
            SendOutcome::DeliveryFailed
        };

        Ok(send_response(&email, purpose, outcome, token.expires_at))
    }

    fn otp_email(token: &OtpToken, user_name: Option<&str>) -> OtpEmail {
        OtpEmail {
            to: token.email.clone(),
            subject: token.purpose.email_subject().to_string(),
            otp: token.code.clone(),
            user_name: user_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }

    /// Send on a spawned task; the outcome only reaches the logs
    fn spawn_email(&self, message: OtpEmail) {
        let email_service = Arc::clone(&self.email_service);
        tokio::spawn(async move {
            if email_service.send_otp_email(&message).await {
                tracing::debug!(
                    email = %mask_email(&message.to),
                    event = "otp_email_delivered",
                    "Background OTP email accepted"
                );
            } else {
                tracing::warn!(
                    email = %mask_email(&message.to),
                    event = "otp_email_failed",
                    "Background OTP email was not delivered"
                );
            }
        });
    }

    async fn resolve_account_after_consume(&self, email: &str) -> Result<Uuid, FlowError> {
        match self.accounts.find_account_id_by_email(email).await {
            Ok(Some(id)) => Ok(id),
            Ok(None) => {
                tracing::error!(
                    email = %mask_email(email),
                    event = "password_reset_no_account",
                    "Reset code verified but no account matches the email"
                );
                Err(FlowError::PasswordUpdateFailed)
            }
            Err(e) => {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "account_lookup_failed",
                    "Account store error after code was consumed"
                );
                Err(FlowError::PasswordUpdateFailed)
            }
        }
    }

    fn validated_email(email: &str) -> Result<String, FlowError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(email)
    }

    fn map_domain_error(error: DomainError) -> FlowError {
        match error {
            DomainError::ValidationErr(e) => FlowError::Validation(e),
            _ => FlowError::Unavailable,
        }
    }
}
