//! HTTP email delivery
//!
//! Posts `{from, to, subject, text}` JSON to a transactional email API with
//! a bearer key. Any transport error or non-2xx status is reported as
//! not-sent.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};

use campus_core::services::{EmailServiceTrait, OtpEmail};
use campus_shared::validation::mask_email;
use campus_shared::EmailConfig;

use crate::InfrastructureError;

use super::render_otp_body;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

/// Email service backed by an HTTP API
pub struct HttpEmailService {
    client: reqwest::Client,
    config: EmailConfig,
    expiration_minutes: i64,
}

impl HttpEmailService {
    pub fn new(config: EmailConfig, expiration_minutes: i64) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config("EMAIL_API_URL not set".to_string()));
        }
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config("EMAIL_API_KEY not set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(from = %config.from_address, "HTTP email service initialized");

        Ok(Self {
            client,
            config,
            expiration_minutes,
        })
    }

    async fn post(&self, email: &OtpEmail) -> Result<(), InfrastructureError> {
        let body = SendEmailRequest {
            from: &self.config.from_address,
            to: &email.to,
            subject: &email.subject,
            text: render_otp_body(&email.otp, email.user_name.as_deref(), self.expiration_minutes),
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(InfrastructureError::Email(format!(
                "provider returned {}: {}",
                status, detail
            )))
        }
    }
}

#[async_trait]
impl EmailServiceTrait for HttpEmailService {
    async fn send_otp_email(&self, email: &OtpEmail) -> bool {
        match self.post(email).await {
            Ok(()) => {
                info!(to = %mask_email(&email.to), "OTP email accepted by provider");
                true
            }
            Err(e) => {
                error!(to = %mask_email(&email.to), error = %e, "Failed to send OTP email");
                false
            }
        }
    }
}
