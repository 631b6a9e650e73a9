//! Result of presenting a code to the token store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-safe messages. Absent and expired tokens share one message so the
/// response never reveals whether a code was ever issued.
pub mod messages {
    pub const INVALID_OR_EXPIRED: &str = "Invalid or expired code";
    pub const TOO_MANY_ATTEMPTS: &str = "Too many attempts. Please request a new code";
    pub const VERIFIED: &str = "Code verified successfully";
}

/// Outcome of one atomic verification against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// No unused, unexpired token for the (email, purpose) pair
    NoActiveToken,
    /// The latest token already reached its attempt ceiling
    TooManyAttempts,
    /// Wrong code; the attempt was recorded
    Mismatch { remaining: i32 },
    /// Code accepted and consumed
    Verified { user_id: Option<Uuid> },
}

impl AttemptOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, AttemptOutcome::Verified { .. })
    }

    /// Message safe to display verbatim
    pub fn user_message(&self) -> String {
        match self {
            AttemptOutcome::NoActiveToken => messages::INVALID_OR_EXPIRED.to_string(),
            AttemptOutcome::TooManyAttempts => messages::TOO_MANY_ATTEMPTS.to_string(),
            AttemptOutcome::Mismatch { remaining } => {
                format!("Incorrect code. {} attempt(s) remaining", remaining)
            }
            AttemptOutcome::Verified { .. } => messages::VERIFIED.to_string(),
        }
    }
}
