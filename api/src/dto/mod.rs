//! Request bodies accepted by the HTTP layer
//!
//! Responses reuse `campus_shared::OtpResponse` and `campus_shared::ErrorResponse`.

pub mod otp;

pub use otp::{ResetPasswordRequest, SendOtpRequest, VerifyOtpRequest};
