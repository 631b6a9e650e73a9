//! OTP lifecycle service
//!
//! Issuance, atomic verification, resend with supersession and the
//! expiry sweep, plus the background task that drives the sweep.

mod cleanup;
mod clock;
mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{OtpCleanupConfig, OtpCleanupService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use types::VerifyCodeResult;
