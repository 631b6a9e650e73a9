
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::repositories::{MockAccountRepository, MockOtpTokenRepository};
use crate::services::otp::{ManualClock, OtpService, OtpServiceConfig};

pub(super) type TestService = OtpService<MockOtpTokenRepository, MockAccountRepository>;

pub(super) struct Harness {
    pub service: Arc<TestService>,
    pub tokens: Arc<MockOtpTokenRepository>,
    pub accounts: Arc<MockAccountRepository>,
    pub clock: Arc<ManualClock>,
}

pub(super) fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub(super) fn harness() -> Harness {
    harness_with(OtpServiceConfig::default())
}

pub(super) fn harness_with(config: OtpServiceConfig) -> Harness {
    let tokens = Arc::new(MockOtpTokenRepository::new());
    let accounts = Arc::new(MockAccountRepository::new());
    let clock = Arc::new(ManualClock::new(start()));
    let service = OtpService::new(tokens.clone(), accounts.clone(), config)
        .with_clock(clock.clone());

    Harness {
        service: Arc::new(service),
        tokens,
        accounts,
        clock,
    }
}

/// A well-formed code guaranteed to differ from `code`
pub(super) fn wrong_code(code: &str) -> &'static str {
    if code == "123456" {
        "654321"
    } else {
        "123456"
    }
}
