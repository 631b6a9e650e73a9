//! Shared test application built on the in-memory collaborators

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};

use campus_api::AppState;
use campus_core::{
    AuthFlowConfig, AuthFlowService, ManualClock, MockAccountRepository, MockOtpTokenRepository,
    OtpService, OtpServiceConfig,
};
use campus_infra::{MockEmailService, MockIdentityProvider};

pub type TestState =
    AppState<MockOtpTokenRepository, MockAccountRepository, MockEmailService, MockIdentityProvider>;

pub const STUDENT: &str = "student@ncit.edu.np";
pub const PAYLOAD_LIMIT: usize = 64 * 1024;

/// Handles on every collaborator behind the test application
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub tokens: MockOtpTokenRepository,
    pub accounts: Arc<MockAccountRepository>,
    pub email: MockEmailService,
    pub identity: MockIdentityProvider,
    pub clock: Arc<ManualClock>,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

impl TestContext {
    pub fn new() -> Self {
        let tokens = MockOtpTokenRepository::new();
        let accounts = Arc::new(MockAccountRepository::new());
        let email = MockEmailService::new();
        let identity = MockIdentityProvider::new();
        let clock = Arc::new(ManualClock::new(start_time()));

        let otp_service = Arc::new(
            OtpService::new(
                Arc::new(tokens.clone()),
                accounts.clone(),
                OtpServiceConfig::default(),
            )
            .with_clock(clock.clone()),
        );
        let auth_service = Arc::new(AuthFlowService::new(
            otp_service,
            accounts.clone(),
            Arc::new(email.clone()),
            Arc::new(identity.clone()),
            AuthFlowConfig::default(),
        ));

        Self {
            state: web::Data::new(AppState::new(auth_service)),
            tokens,
            accounts,
            email,
            identity,
            clock,
        }
    }

    /// Context with one registered account, returning its id
    pub async fn with_student() -> (Self, uuid::Uuid) {
        let context = Self::new();
        let user_id = context.accounts.add_account(STUDENT).await;
        (context, user_id)
    }

    pub async fn last_code(&self, email: &str) -> String {
        self.email
            .last_code_for(email)
            .await
            .expect("an email should have been sent")
    }
}

/// POST a JSON body and evaluate to the status with the parsed response body
macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        let status = resp.status().as_u16();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}

/// Build the application under test from a context
macro_rules! test_app {
    ($context:expr) => {
        actix_web::test::init_service(campus_api::create_app(
            $context.state.clone(),
            $crate::common::PAYLOAD_LIMIT,
        ))
        .await
    };
}
