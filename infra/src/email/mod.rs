//! Email delivery module
//!
//! Implementations of the email collaborator used to send OTP codes.
//!
//! - **HTTP**: JSON POST to a transactional email API
//! - **Mock**: logs and records messages for development and tests

use std::sync::Arc;

use campus_core::services::EmailServiceTrait;
use campus_shared::{EmailConfig, Environment};

use crate::InfrastructureError;

pub mod http_email;
pub mod mock_email;

pub use http_email::HttpEmailService;
pub use mock_email::MockEmailService;

#[cfg(test)]
mod tests;

/// Build the body text of an OTP email
pub fn render_otp_body(otp: &str, user_name: Option<&str>, expiration_minutes: i64) -> String {
    let greeting = match user_name {
        Some(name) => format!("Hi {},", name),
        None => "Hi,".to_string(),
    };
    format!(
        "{}\n\nYour verification code is {}.\n\nIt expires in {} minutes and can only be used once. \
         If you did not request this code you can ignore this email.",
        greeting, otp, expiration_minutes
    )
}

/// Create an email service based on configuration
///
/// An incomplete HTTP configuration or an unknown provider is an error. The
/// mock service delivers nothing, so it is refused in production.
pub fn create_email_service(
    config: &EmailConfig,
    expiration_minutes: i64,
    environment: Environment,
) -> Result<Arc<dyn EmailServiceTrait>, InfrastructureError> {
    match config.provider.as_str() {
        "http" => Ok(Arc::new(HttpEmailService::new(config.clone(), expiration_minutes)?)),
        "mock" if environment.is_production() => Err(InfrastructureError::Config(
            "EMAIL_PROVIDER=mock is not allowed in production".to_string(),
        )),
        "mock" => {
            tracing::warn!(%environment, "Using mock email service, codes will not be delivered");
            Ok(Arc::new(MockEmailService::new()))
        }
        other => Err(InfrastructureError::Config(format!(
            "unknown email provider '{}'",
            other
        ))),
    }
}
