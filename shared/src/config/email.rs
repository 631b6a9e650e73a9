//! Outbound email collaborator configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Email provider ("http", "mock")
    pub provider: String,
    /// Endpoint accepting `{to, from, subject, text}` JSON
    pub api_url: String,
    /// Bearer key for the endpoint
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            api_url: String::new(),
            api_key: String::new(),
            from_address: "no-reply@campus.local".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl EmailConfig {
    /// Create from `EMAIL_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or_default(),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM_ADDRESS").unwrap_or(defaults.from_address),
            request_timeout_secs: env_or("EMAIL_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
        }
    }
}
