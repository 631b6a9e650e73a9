//! OTP endpoint response body

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by send, resend, verify and reset-password
///
/// ```json
/// { "success": true, "message": "...", "user_id": "...", "expiresAt": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Message safe to show to the end user verbatim
    pub message: String,

    /// Account bound to a verified code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// When a freshly sent code stops being accepted
    #[serde(rename = "expiresAt", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl OtpResponse {
    /// A successful result
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            user_id: None,
            expires_at: None,
        }
    }

    /// A business-rule failure
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user_id: None,
            expires_at: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}
