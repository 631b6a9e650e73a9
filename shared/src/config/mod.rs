//! Configuration module with business-specific sub-modules
//!
//! - `database` - Postgres connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time password lifetime, attempt ceiling and sweep cadence
//! - `email` - Outbound email collaborator
//! - `identity` - Hosted identity provider (password updates)
//! - `server` - HTTP server and CORS configuration

pub mod database;
pub mod email;
pub mod environment;
pub mod identity;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use identity::IdentityConfig;
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub otp: OtpConfig,
    pub email: EmailConfig,
    pub identity: IdentityConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            identity: IdentityConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let cors = if environment.is_development() {
            CorsConfig::development()
        } else {
            CorsConfig::from_env()
        };

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            otp: OtpConfig::from_env(),
            email: EmailConfig::from_env(),
            identity: IdentityConfig::from_env(),
            cors,
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
