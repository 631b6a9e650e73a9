//! Hosted identity provider configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Connection settings for the identity provider's admin API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Identity provider ("http", "mock")
    pub provider: String,
    /// Base URL of the hosted backend, e.g. `https://project.example.co`
    pub base_url: String,
    /// Service-role key used for admin calls
    pub service_key: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            base_url: String::new(),
            service_key: String::new(),
            request_timeout_secs: 10,
        }
    }
}

impl IdentityConfig {
    /// Create from `IDENTITY_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("IDENTITY_PROVIDER").unwrap_or(defaults.provider),
            base_url: std::env::var("IDENTITY_BASE_URL").unwrap_or_default(),
            service_key: std::env::var("IDENTITY_SERVICE_KEY").unwrap_or_default(),
            request_timeout_secs: env_or(
                "IDENTITY_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
        }
    }
}
