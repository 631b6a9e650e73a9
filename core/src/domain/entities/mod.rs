//! Domain entities representing core business objects.

pub mod otp_token;

#[cfg(test)]
mod tests;

pub use otp_token::{
    OtpPurpose, OtpToken, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES,
    MAX_ATTEMPTS,
};
