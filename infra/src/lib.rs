//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for Campus Connect,
//! providing concrete implementations of the ports defined in `campus_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: Postgres token and account repositories using SQLx
//! - **Email**: HTTP email delivery client and a logging mock
//! - **Identity**: Hosted identity provider admin client and a mock

use campus_core::errors::DomainError;

/// Database module - Postgres implementations using SQLx
pub mod database;

/// Email delivery module
pub mod email;

/// Identity provider module
pub mod identity;

pub use database::{DatabasePool, PgAccountRepository, PgOtpTokenRepository, PoolStatistics};
pub use email::{create_email_service, HttpEmailService, MockEmailService};
pub use identity::{create_identity_provider, HttpIdentityProvider, MockIdentityProvider};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure at startup
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),

    /// Identity provider error
    #[error("Identity provider error: {0}")]
    Identity(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => database::map_db_error(e),
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
