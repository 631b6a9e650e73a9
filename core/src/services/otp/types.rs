//! Types for OTP service results

use uuid::Uuid;

use crate::domain::value_objects::AttemptOutcome;

/// Result of verifying a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeResult {
    /// Whether the verification was successful
    pub success: bool,
    /// User-safe message describing the outcome
    pub message: String,
    /// Account bound to the consumed token
    pub user_id: Option<Uuid>,
    /// Number of remaining attempts (after a mismatch)
    pub remaining_attempts: Option<i32>,
}

impl From<AttemptOutcome> for VerifyCodeResult {
    fn from(outcome: AttemptOutcome) -> Self {
        let message = outcome.user_message();
        match outcome {
            AttemptOutcome::Verified { user_id } => Self {
                success: true,
                message,
                user_id,
                remaining_attempts: None,
            },
            AttemptOutcome::Mismatch { remaining } => Self {
                success: false,
                message,
                user_id: None,
                remaining_attempts: Some(remaining),
            },
            AttemptOutcome::NoActiveToken | AttemptOutcome::TooManyAttempts => Self {
                success: false,
                message,
                user_id: None,
                remaining_attempts: None,
            },
        }
    }
}
