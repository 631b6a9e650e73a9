//! Traits for email delivery and identity provider integration

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message handed to the email collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpEmail {
    pub to: String,
    pub subject: String,
    pub otp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Trait for email service integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a code by email, returning whether it was accepted for delivery
    ///
    /// A `false` is never fatal to the caller.
    async fn send_otp_email(&self, email: &OtpEmail) -> bool;
}

/// Trait for the external identity provider
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Replace the password of an account
    async fn update_password(&self, user_id: Uuid, new_password: &str) -> Result<(), String>;
}
