//! Domain-specific error types and error handling.

use thiserror::Error;

/// Input rejected before it reaches the token store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Code must be exactly 6 digits")]
    InvalidCodeFormat,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Rejected configuration or other non-request input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The token store or another backing service could not be reached
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        DomainError::Unavailable {
            message: message.into(),
        }
    }

    /// True for input errors the caller can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation { .. } | DomainError::ValidationErr(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
