//! Composite OTP flows used by the HTTP layer
//!
//! This module ties the OTP lifecycle to its collaborators:
//! - account lookup before a code is issued
//! - email delivery of the code
//! - the uniform disclosure policy for send and resend
//! - the two-phase password reset against the identity provider

mod config;
pub mod disclosure;
mod error;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::{AuthFlowConfig, MIN_PASSWORD_LENGTH};
pub use disclosure::{SendOutcome, GENERIC_SEND_MESSAGE};
pub use error::FlowError;
pub use service::{AuthFlowService, PASSWORD_UPDATED};
pub use traits::{EmailServiceTrait, IdentityProviderTrait, OtpEmail};
