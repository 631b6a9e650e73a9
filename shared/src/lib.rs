//! Shared utilities and common types for the Campus Connect server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The error envelope and the OTP response shape
//! - Email and OTP format validators

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, EmailConfig, Environment, IdentityConfig, LoggingConfig,
    OtpConfig, ServerConfig, CorsConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::OtpResponse;
pub use utils::validation;
