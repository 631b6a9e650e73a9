//! Admin API client for the hosted identity provider

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use campus_core::services::IdentityProviderTrait;
use campus_shared::IdentityConfig;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct UpdateUserRequest<'a> {
    password: &'a str,
}

pub struct HttpIdentityProvider {
    client: reqwest::Client,
    config: IdentityConfig,
}

impl HttpIdentityProvider {
    pub fn new(config: IdentityConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.is_empty() {
            return Err(InfrastructureError::Config(
                "IDENTITY_BASE_URL not set".to_string(),
            ));
        }
        if config.service_key.is_empty() {
            return Err(InfrastructureError::Config(
                "IDENTITY_SERVICE_KEY not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    async fn put_password(&self, user_id: Uuid, new_password: &str) -> Result<(), InfrastructureError> {
        let response = self
            .client
            .put(self.user_url(user_id))
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .json(&UpdateUserRequest {
                password: new_password,
            })
            .send()
            .await
            .map_err(|e| InfrastructureError::Identity(format!("request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(InfrastructureError::Identity(format!(
                "provider returned {}: {}",
                status, detail
            )))
        }
    }

    /// `{base_url}/auth/v1/admin/users/{user_id}`
    pub fn user_url(&self, user_id: Uuid) -> String {
        format!(
            "{}/auth/v1/admin/users/{}",
            self.config.base_url.trim_end_matches('/'),
            user_id
        )
    }
}

#[async_trait]
impl IdentityProviderTrait for HttpIdentityProvider {
    async fn update_password(&self, user_id: Uuid, new_password: &str) -> Result<(), String> {
        match self.put_password(user_id, new_password).await {
            Ok(()) => {
                info!(user_id = %user_id, "Password updated at identity provider");
                Ok(())
            }
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Identity provider rejected password update");
                Err(e.to_string())
            }
        }
    }
}
