//! Outward response policy for send and resend
//!
//! Every purpose goes through [`send_response`], so callers observe the same
//! body whether the account exists, the code was stored, or the email was
//! delivered. The real outcome only reaches the logs.

use chrono::{DateTime, Utc};

use campus_shared::validation::mask_email;
use campus_shared::OtpResponse;

use crate::domain::entities::OtpPurpose;

pub const GENERIC_SEND_MESSAGE: &str =
    "If an account exists for this email, a verification code has been sent";

/// What actually happened behind a send or resend request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Code stored and accepted by the email collaborator
    Delivered,
    /// Code stored and the email handed to a background task
    Queued,
    /// Code stored but the email collaborator returned `false`
    DeliveryFailed,
    /// The token write failed
    NotIssued,
    /// No account for the address, nothing was issued
    NoAccount,
}

impl SendOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendOutcome::Delivered => "delivered",
            SendOutcome::Queued => "queued",
            SendOutcome::DeliveryFailed => "delivery_failed",
            SendOutcome::NotIssued => "not_issued",
            SendOutcome::NoAccount => "no_account",
        }
    }
}

/// Build the response for a send or resend
///
/// `expires_at` is the stored token's expiry when one was issued, otherwise
/// the expiry a token issued now would have.
pub fn send_response(
    email: &str,
    purpose: OtpPurpose,
    outcome: SendOutcome,
    expires_at: DateTime<Utc>,
) -> OtpResponse {
    match outcome {
        SendOutcome::Delivered | SendOutcome::Queued => tracing::info!(
            email = %mask_email(email),
            purpose = %purpose,
            outcome = outcome.as_str(),
            event = "otp_send",
            "Verification code sent"
        ),
        _ => tracing::warn!(
            email = %mask_email(email),
            purpose = %purpose,
            outcome = outcome.as_str(),
            event = "otp_send",
            "Verification code not delivered"
        ),
    }

    OtpResponse::ok(GENERIC_SEND_MESSAGE).with_expires_at(expires_at)
}
