use thiserror::Error;

use crate::errors::ValidationError;

/// Failures of a composite flow that are not a business `success: false`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Malformed input, rejected before any store access
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Token or account store could not be reached
    #[error("Service temporarily unavailable. Please try again later")]
    Unavailable,

    /// The code was consumed but the identity provider rejected the update
    #[error("Password could not be updated. Please request a new code and try again")]
    PasswordUpdateFailed,
}

impl FlowError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }
}
