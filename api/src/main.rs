use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use campus_api::middleware::create_cors;
use campus_api::routes::AppState;
use campus_api::telemetry::init_tracing;
use campus_api::{configure_routes, json_config};
use campus_core::services::{
    AuthFlowConfig, AuthFlowService, EmailServiceTrait, IdentityProviderTrait, OtpCleanupConfig,
    OtpCleanupService, OtpService, OtpServiceConfig,
};
use campus_infra::{
    create_email_service, create_identity_provider, DatabasePool, PgAccountRepository,
    PgOtpTokenRepository,
};
use campus_shared::AppConfig;

type Tokens = PgOtpTokenRepository;
type Accounts = PgAccountRepository;
type Email = dyn EmailServiceTrait;
type Identity = dyn IdentityProviderTrait;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting Campus Connect API server");

    let otp_config =
        OtpServiceConfig::try_from(&config.otp).context("invalid OTP configuration")?;
    let email_service = create_email_service(
        &config.email,
        otp_config.code_expiration_minutes(),
        config.environment,
    )
    .context("failed to configure email delivery")?;
    let identity_provider = create_identity_provider(&config.identity, config.environment)
        .context("failed to configure identity provider")?;

    let db_pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    db_pool
        .run_migrations()
        .await
        .context("failed to run database migrations")?;
    tracing::info!("{}", db_pool.get_statistics());

    let tokens = Arc::new(Tokens::new(db_pool.get_pool().clone()));
    let accounts = Arc::new(Accounts::new(db_pool.get_pool().clone()));

    let otp_service = Arc::new(OtpService::new(tokens, accounts.clone(), otp_config));

    let cleanup = Arc::new(OtpCleanupService::new(
        otp_service.clone(),
        OtpCleanupConfig::from(&config.otp),
    ));
    let cleanup_handle = cleanup.start_background_task();

    let auth_service = Arc::new(AuthFlowService::new(
        otp_service,
        accounts,
        email_service,
        identity_provider,
        AuthFlowConfig::from(&config.otp),
    ));
    let app_state = web::Data::new(AppState::<Tokens, Accounts, Email, Identity>::new(auth_service));

    let bind_address = config.server.bind_address();
    let max_payload_size = config.server.max_payload_size;
    let cors_config = config.cors.clone();
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors(&cors_config))
            .wrap(TracingLogger::default())
            .app_data(app_state.clone())
            .app_data(json_config(max_payload_size))
            .configure(configure_routes::<Tokens, Accounts, Email, Identity>)
    })
    .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }
    db_pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}
