use actix_web::{web, HttpResponse};
use validator::Validate;

use campus_core::repositories::{AccountRepository, OtpTokenRepository};
use campus_core::services::{EmailServiceTrait, IdentityProviderTrait};

use crate::dto::VerifyOtpRequest;
use crate::handlers::{flow_error_response, validation_failure};
use crate::routes::AppState;

/// Handler for POST /api/v1/otp/verify
///
/// A wrong, expired or exhausted code is still a 200 with `success: false`.
/// Only a malformed body (400) or an unreachable token store (500) changes
/// the status.
///
/// ```json
/// { "success": true, "message": "Code verified successfully", "user_id": "..." }
/// ```
pub async fn verify_otp<R, A, E, I>(
    state: web::Data<AppState<R, A, E, I>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    R: OtpTokenRepository + 'static,
    A: AccountRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
    I: IdentityProviderTrait + ?Sized + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    match state
        .auth_service
        .verify_code(&request.email, &request.otp, request.purpose)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => flow_error_response(&error),
    }
}
