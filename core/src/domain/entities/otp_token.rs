//! One-time password token entity.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_shared::validation::normalize_email;

use crate::domain::value_objects::AttemptOutcome;

/// Maximum number of failed verification attempts allowed per token
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code ever issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code ever issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// The flow a token was issued for. A token never satisfies another purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    EmailVerification,
    PasswordReset,
    AccountRecovery,
}

impl OtpPurpose {
    pub const ALL: [OtpPurpose; 3] = [
        OtpPurpose::EmailVerification,
        OtpPurpose::PasswordReset,
        OtpPurpose::AccountRecovery,
    ];

    /// Stored and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::EmailVerification => "email_verification",
            OtpPurpose::PasswordReset => "password_reset",
            OtpPurpose::AccountRecovery => "account_recovery",
        }
    }

    /// Subject line used when the code is emailed
    pub fn email_subject(&self) -> &'static str {
        match self {
            OtpPurpose::EmailVerification => "Verify your email address",
            OtpPurpose::PasswordReset => "Your password reset code",
            OtpPurpose::AccountRecovery => "Your account recovery code",
        }
    }
}

impl std::fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_verification" => Ok(OtpPurpose::EmailVerification),
            "password_reset" => Ok(OtpPurpose::PasswordReset),
            "account_recovery" => Ok(OtpPurpose::AccountRecovery),
            _ => Err(format!("Invalid OTP purpose: {}", s)),
        }
    }
}

/// One issued code bound to an email address and a purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpToken {
    /// Unique identifier for the token
    pub id: Uuid,

    /// Owning account, absent when issued before the account was resolved
    pub user_id: Option<Uuid>,

    /// Lower-cased target address
    pub email: String,

    /// The 6-digit code
    pub code: String,

    /// Flow this token belongs to
    pub purpose: OtpPurpose,

    /// Failed verification attempts so far
    pub attempts: i32,

    /// Ceiling after which the token is permanently rejected
    pub max_attempts: i32,

    /// Set once, never cleared
    pub is_used: bool,

    /// Set exactly once, on successful verification
    pub verified_at: Option<DateTime<Utc>>,

    /// Fixed, non-renewable expiry
    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OtpToken {
    /// Creates a token with the default lifetime and attempt ceiling, issued now
    pub fn new(email: &str, purpose: OtpPurpose, user_id: Option<Uuid>) -> Self {
        Self::issue_at(
            email,
            purpose,
            user_id,
            Utc::now(),
            DEFAULT_EXPIRATION_MINUTES,
            MAX_ATTEMPTS,
        )
    }

    /// Creates a token issued at `now`
    ///
    /// # Arguments
    ///
    /// * `email` - Target address in any casing; stored lower-cased
    /// * `purpose` - Flow the code is scoped to
    /// * `user_id` - Pre-resolved account, if known
    /// * `now` - Issuance time
    /// * `expiration_minutes` - Lifetime of the code
    /// * `max_attempts` - Failed attempts tolerated before the code dies
    pub fn issue_at(
        email: &str,
        purpose: OtpPurpose,
        user_id: Option<Uuid>,
        now: DateTime<Utc>,
        expiration_minutes: i64,
        max_attempts: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            email: normalize_email(email),
            code: Self::generate_code(),
            purpose,
            attempts: 0,
            max_attempts,
            is_used: false,
            verified_at: None,
            expires_at: now + Duration::minutes(expiration_minutes),
            created_at: now,
            updated_at: now,
        }
    }

    /// Draws a code uniformly from `CODE_MIN..=CODE_MAX` using the OS CSPRNG
    ///
    /// Codes with a leading zero are never produced even though the
    /// verification format accepts them.
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// A token is expired once `now` reaches `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the attempt ceiling has been reached
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Unused, unexpired and under the attempt ceiling
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && !self.is_expired_at(now) && !self.is_exhausted()
    }

    /// Gets the number of remaining verification attempts (0 if exceeded)
    pub fn remaining_attempts(&self) -> i32 {
        (self.max_attempts - self.attempts).max(0)
    }

    /// Exact match against the stored code, compared in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Applies one verification attempt to this token
    ///
    /// Callers must run this on a row they hold exclusively (row lock or
    /// equivalent) and persist the mutated token in the same unit of work.
    ///
    /// * exhausted: rejected without mutation, the ceiling is monotonic
    /// * mismatch: `attempts` incremented
    /// * match: `is_used` and `verified_at` set
    pub fn apply_attempt(&mut self, submitted: &str, now: DateTime<Utc>) -> AttemptOutcome {
        if self.is_used || self.is_expired_at(now) {
            return AttemptOutcome::NoActiveToken;
        }

        if self.is_exhausted() {
            return AttemptOutcome::TooManyAttempts;
        }

        if self.matches(submitted) {
            self.is_used = true;
            self.verified_at = Some(now);
            self.updated_at = now;
            AttemptOutcome::Verified {
                user_id: self.user_id,
            }
        } else {
            self.attempts += 1;
            self.updated_at = now;
            AttemptOutcome::Mismatch {
                remaining: self.remaining_attempts(),
            }
        }
    }

    /// Marks the token dead because a newer code replaced it
    pub fn supersede(&mut self, now: DateTime<Utc>) {
        self.is_used = true;
        self.updated_at = now;
    }
}
