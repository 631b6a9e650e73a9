//! Periodic expiry sweep for OTP tokens
//!
//! Verification re-checks expiry on every call, so the sweep only keeps the
//! token table small. It is safe to run alongside issuance and verification.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use campus_shared::OtpConfig;

use crate::repositories::{AccountRepository, OtpTokenRepository};

use super::service::OtpService;

/// Configuration for the cleanup service
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

impl From<&OtpConfig> for OtpCleanupConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds.max(1),
            enabled: config.cleanup_enabled,
        }
    }
}

/// Service that runs the expiry sweep on a timer
pub struct OtpCleanupService<R: OtpTokenRepository + 'static, A: AccountRepository + 'static> {
    otp_service: Arc<OtpService<R, A>>,
    config: OtpCleanupConfig,
}

impl<R: OtpTokenRepository + 'static, A: AccountRepository + 'static> OtpCleanupService<R, A> {
    pub fn new(otp_service: Arc<OtpService<R, A>>, config: OtpCleanupConfig) -> Self {
        Self {
            otp_service,
            config,
        }
    }

    /// Run a single sweep
    ///
    /// Returns `true` when skipped because cleanup is disabled.
    pub async fn run_cleanup(&self) -> bool {
        if !self.config.enabled {
            return true;
        }
        self.otp_service.cleanup_expired().await
    }

    /// Start the cleanup loop as a background task
    ///
    /// Returns `None` without spawning when cleanup is disabled. The first
    /// sweep runs immediately.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "OTP cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if !self.run_cleanup().await {
                    warn!("OTP cleanup cycle failed, retrying on next tick");
                }
            }
        }))
    }
}
