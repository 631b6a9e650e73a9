//! Type definitions shared between the service and HTTP layers
//!
//! - `response` - the OTP response body returned by every OTP endpoint

pub mod response;

pub use response::OtpResponse;
