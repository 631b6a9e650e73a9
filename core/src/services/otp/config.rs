//! Configuration for the OTP service

use std::convert::TryFrom;

use chrono::Duration;

use campus_shared::OtpConfig;

use crate::domain::entities::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};
use crate::errors::{DomainError, DomainResult};

/// Longest accepted code lifetime (one day)
pub const MAX_EXPIRATION_MINUTES: i64 = 24 * 60;

/// Highest accepted attempt ceiling
pub const MAX_ATTEMPTS_CEILING: i32 = 10;

/// Configuration for the OTP service
///
/// Only constructible through [`OtpServiceConfig::new`] or `TryFrom`, so a
/// service never holds a lifetime or ceiling outside the accepted range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpServiceConfig {
    code_expiration_minutes: i64,
    max_attempts: i32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl OtpServiceConfig {
    /// Validate and build a configuration
    ///
    /// `code_expiration_minutes` must be in `1..=MAX_EXPIRATION_MINUTES` and
    /// `max_attempts` in `1..=MAX_ATTEMPTS_CEILING`.
    pub fn new(code_expiration_minutes: i64, max_attempts: i32) -> DomainResult<Self> {
        if !(1..=MAX_EXPIRATION_MINUTES).contains(&code_expiration_minutes) {
            return Err(DomainError::Validation {
                message: format!(
                    "OTP expiration must be between 1 and {} minutes, got {}",
                    MAX_EXPIRATION_MINUTES, code_expiration_minutes
                ),
            });
        }
        if !(1..=MAX_ATTEMPTS_CEILING).contains(&max_attempts) {
            return Err(DomainError::Validation {
                message: format!(
                    "OTP max attempts must be between 1 and {}, got {}",
                    MAX_ATTEMPTS_CEILING, max_attempts
                ),
            });
        }
        Ok(Self {
            code_expiration_minutes,
            max_attempts,
        })
    }

    /// Number of minutes before a code expires
    pub fn code_expiration_minutes(&self) -> i64 {
        self.code_expiration_minutes
    }

    /// Maximum number of failed verification attempts allowed
    pub fn max_attempts(&self) -> i32 {
        self.max_attempts
    }

    /// Code lifetime as a duration
    pub fn expiration(&self) -> Duration {
        Duration::minutes(self.code_expiration_minutes)
    }
}

impl TryFrom<&OtpConfig> for OtpServiceConfig {
    type Error = DomainError;

    fn try_from(config: &OtpConfig) -> Result<Self, Self::Error> {
        Self::new(config.code_expiration_minutes, config.max_attempts)
    }
}
