//! Business services containing domain logic and use cases.

pub mod auth;
pub mod otp;

// Re-export commonly used types
pub use auth::{
    AuthFlowConfig, AuthFlowService, EmailServiceTrait, FlowError, IdentityProviderTrait,
    OtpEmail, SendOutcome, GENERIC_SEND_MESSAGE, MIN_PASSWORD_LENGTH, PASSWORD_UPDATED,
};
pub use otp::{
    Clock, ManualClock, OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig,
    SystemClock, VerifyCodeResult,
};
