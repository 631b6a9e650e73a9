use actix_web::{web, HttpResponse};
use validator::Validate;

use campus_core::repositories::{AccountRepository, OtpTokenRepository};
use campus_core::services::{EmailServiceTrait, IdentityProviderTrait};
use campus_shared::validation::mask_email;

use crate::dto::SendOtpRequest;
use crate::handlers::{flow_error_response, validation_failure};
use crate::routes::AppState;

/// Handler for POST /api/v1/otp/send
///
/// # Request Body
///
/// ```json
/// { "email": "student@ncit.edu.np", "purpose": "email_verification", "userName": "Asha" }
/// ```
///
/// # Response
///
/// Always 200 with the same message once the body is valid, whether or not
/// an account exists or the email went out:
///
/// ```json
/// {
///     "success": true,
///     "message": "If an account exists for this email, a verification code has been sent",
///     "expiresAt": "2024-03-01T09:10:00Z"
/// }
/// ```
pub async fn send_otp<R, A, E, I>(
    state: web::Data<AppState<R, A, E, I>>,
    request: web::Json<SendOtpRequest>,
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

    tracing::info!(
        email = %mask_email(&request.email),
        purpose = %request.purpose,
        "Processing send request"
    );

    match state
        .auth_service
        .send_code(&request.email, request.purpose, request.user_name.as_deref())
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => flow_error_response(&error),
    }
}
