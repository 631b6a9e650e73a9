//! OTP endpoints under `/api/v1/otp`

pub mod resend;
pub mod send;
pub mod verify;

pub use resend::resend_otp;
pub use send::send_otp;
pub use verify::verify_otp;
