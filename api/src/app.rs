//! Application factory
//!
//! Route registration and body handling live here so the binary and the
//! integration tests build exactly the same application. Middleware
//! (request tracing, CORS) is added by the binary.

use actix_web::{web, App, HttpResponse};
use chrono::Utc;

use campus_core::repositories::{AccountRepository, OtpTokenRepository};
use campus_core::services::{EmailServiceTrait, IdentityProviderTrait};
use campus_shared::{error_codes, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::routes::{auth, otp, AppState};

/// Create the application with all routes and the given state
pub fn create_app<R, A, E, I>(
    app_state: web::Data<AppState<R, A, E, I>>,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: OtpTokenRepository + 'static,
    A: AccountRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
    I: IdentityProviderTrait + ?Sized + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config(max_payload_size))
        .configure(configure_routes::<R, A, E, I>)
}

/// JSON extractor settings: size limit and the 400 error envelope
pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler)
}

/// Register every route
pub fn configure_routes<R, A, E, I>(cfg: &mut web::ServiceConfig)
where
    R: OtpTokenRepository + 'static,
    A: AccountRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
    I: IdentityProviderTrait + ?Sized + 'static,
{
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/otp")
                        .route("/send", web::post().to(otp::send_otp::<R, A, E, I>))
                        .route("/verify", web::post().to(otp::verify_otp::<R, A, E, I>))
                        .route("/resend", web::post().to(otp::resend_otp::<R, A, E, I>)),
                )
                .service(
                    web::scope("/auth").route(
                        "/reset-password",
                        web::post().to(auth::reset_password::<R, A, E, I>),
                    ),
                ),
        )
        .default_service(web::to(not_found));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
