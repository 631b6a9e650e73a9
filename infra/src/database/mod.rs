//! Database module - Postgres implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Repository implementations
//! - Embedded migrations

pub mod connection;
pub mod postgres;

#[cfg(test)]
mod tests;

use campus_core::errors::DomainError;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::{PgAccountRepository, PgOtpTokenRepository};

/// Map a SQLx error onto the domain taxonomy
///
/// Connectivity problems become `Unavailable`; everything else is an
/// internal error.
pub fn map_db_error(error: sqlx::Error) -> DomainError {
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => DomainError::Unavailable {
            message: error.to_string(),
        },
        other => DomainError::Internal {
            message: format!("Database error: {}", other),
        },
    }
}
