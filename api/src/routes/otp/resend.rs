use actix_web::{web, HttpResponse};
use validator::Validate;

use campus_core::repositories::{AccountRepository, OtpTokenRepository};
use campus_core::services::{EmailServiceTrait, IdentityProviderTrait};
use campus_shared::validation::mask_email;

use crate::dto::SendOtpRequest;
use crate::handlers::{flow_error_response, validation_failure};
use crate::routes::AppState;

/// Handler for POST /api/v1/otp/resend
///
/// Same body and response as send. Every outstanding code for the email
/// and purpose is invalidated before the new one is issued.
pub async fn resend_otp<R, A, E, I>(
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
        "Processing resend request"
    );

    match state
        .auth_service
        .resend_code(&request.email, request.purpose, request.user_name.as_deref())
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => flow_error_response(&error),
    }
}
