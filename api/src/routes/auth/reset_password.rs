use actix_web::{web, HttpResponse};
use validator::Validate;

use campus_core::repositories::{AccountRepository, OtpTokenRepository};
use campus_core::services::{EmailServiceTrait, IdentityProviderTrait};
use campus_shared::validation::mask_email;

use crate::dto::ResetPasswordRequest;
use crate::handlers::{flow_error_response, validation_failure};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/reset-password
///
/// # Request Body
///
/// ```json
/// { "email": "student@ncit.edu.np", "otp": "482913", "newPassword": "correct horse" }
/// ```
///
/// The code must have been sent with purpose `password_reset`. If it
/// verifies but the identity provider rejects the update, the code is
/// already spent and the 500 body tells the user to request a new one.
pub async fn reset_password<R, A, E, I>(
    state: web::Data<AppState<R, A, E, I>>,
    request: web::Json<ResetPasswordRequest>,
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

    tracing::info!(email = %mask_email(&request.email), "Processing password reset");

    match state
        .auth_service
        .reset_password(&request.email, &request.otp, &request.new_password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => flow_error_response(&error),
    }
}
