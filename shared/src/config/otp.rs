//! One-time password configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Lifetime, attempt ceiling and sweep cadence for issued codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes from issuance until a code expires
    pub code_expiration_minutes: i64,

    /// Failed attempts after which a code is permanently rejected
    pub max_attempts: i32,

    /// Seconds between expiry sweeps
    pub cleanup_interval_seconds: u64,

    /// Whether the periodic expiry sweep runs
    pub cleanup_enabled: bool,

    /// Send emails from a background task instead of inside the request
    pub background_delivery: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 10,
            max_attempts: 3,
            cleanup_interval_seconds: 3600,
            cleanup_enabled: true,
            background_delivery: true,
        }
    }
}

impl OtpConfig {
    /// Create from `OTP_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_expiration_minutes: env_or("OTP_EXPIRATION_MINUTES", defaults.code_expiration_minutes),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            cleanup_interval_seconds: env_or(
                "OTP_CLEANUP_INTERVAL_SECONDS",
                defaults.cleanup_interval_seconds,
            ),
            cleanup_enabled: env_or("OTP_CLEANUP_ENABLED", defaults.cleanup_enabled),
            background_delivery: env_or("OTP_BACKGROUND_DELIVERY", defaults.background_delivery),
        }
    }
}
