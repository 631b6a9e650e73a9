pub mod account;
pub mod otp_token;

pub use account::{AccountRepository, MockAccountRepository};
pub use otp_token::{MockOtpTokenRepository, OtpTokenRepository};
