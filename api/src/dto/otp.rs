use campus_core::domain::entities::OtpPurpose;
use campus_shared::validation::{is_valid_email, OTP_CODE_REGEX};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /api/v1/otp/send` and `POST /api/v1/otp/resend`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,

    /// `email_verification`, `password_reset` or `account_recovery`
    pub purpose: OtpPurpose,

    /// Used to personalise the email greeting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "Name is too long"))]
    pub user_name: Option<String>,
}

/// Body of `POST /api/v1/otp/verify`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,

    #[validate(regex(path = *OTP_CODE_REGEX, message = "Code must be exactly 6 digits"))]
    pub otp: String,

    pub purpose: OtpPurpose,
}

/// Body of `POST /api/v1/auth/reset-password`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,

    #[validate(regex(path = *OTP_CODE_REGEX, message = "Code must be exactly 6 digits"))]
    pub otp: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Same shape check the flow service applies, so padded addresses pass
/// here and are normalised later.
fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        let mut error = ValidationError::new("email");
        error.message = Some("Invalid email address".into());
        Err(error)
    }
}
