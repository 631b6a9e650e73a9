//! Tests for POST /api/v1/auth/reset-password

#[macro_use]
mod common;

use serde_json::json;

use common::{TestContext, STUDENT};

const NEW_PASSWORD: &str = "correct horse battery";

async fn request_reset_code(context: &TestContext) -> String {
    let app = test_app!(context);
    let (status, _) = post_json!(
        app,
        "/api/v1/otp/send",
        json!({ "email": STUDENT, "purpose": "password_reset" })
    );
    assert_eq!(status, 200);
    context.last_code(STUDENT).await
}

#[actix_web::test]
async fn test_reset_password_success() {
    let (context, user_id) = TestContext::with_student().await;
    let code = request_reset_code(&context).await;
    let app = test_app!(context);

    let (status, body) = post_json!(
        app,
        "/api/v1/auth/reset-password",
        json!({ "email": STUDENT, "otp": code, "newPassword": NEW_PASSWORD })
    );

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Password updated successfully");
    assert_eq!(context.identity.updated_users().await, vec![user_id]);
}

#[actix_web::test]
async fn test_short_password_keeps_code_usable() {
    let (context, _) = TestContext::with_student().await;
    let code = request_reset_code(&context).await;
    let app = test_app!(context);

    let (status, body) = post_json!(
        app,
        "/api/v1/auth/reset-password",
        json!({ "email": STUDENT, "otp": code, "newPassword": "short" })
    );
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Password must be at least 8 characters");

    let (status, body) = post_json!(
        app,
        "/api/v1/auth/reset-password",
        json!({ "email": STUDENT, "otp": code, "newPassword": NEW_PASSWORD })
    );
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn test_wrong_code_does_not_touch_identity_provider() {
    let (context, _) = TestContext::with_student().await;
    let code = request_reset_code(&context).await;
    let wrong = if code == "654321" { "123456" } else { "654321" };
    let app = test_app!(context);

    let (status, body) = post_json!(
        app,
        "/api/v1/auth/reset-password",
        json!({ "email": STUDENT, "otp": wrong, "newPassword": NEW_PASSWORD })
    );

    assert_eq!(status, 200);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Incorrect code. 2 attempt(s) remaining");
    assert!(context.identity.updated_users().await.is_empty());
}

#[actix_web::test]
async fn test_email_verification_code_cannot_reset_password() {
    let (context, _) = TestContext::with_student().await;
    let app = test_app!(context);

    post_json!(
        app,
        "/api/v1/otp/send",
        json!({ "email": STUDENT, "purpose": "email_verification" })
    );
    let code = context.last_code(STUDENT).await;

    let (status, body) = post_json!(
        app,
        "/api/v1/auth/reset-password",
        json!({ "email": STUDENT, "otp": code, "newPassword": NEW_PASSWORD })
    );
    assert_eq!(status, 200);
    assert_eq!(body["success"], false);
    assert!(context.identity.updated_users().await.is_empty());
}

#[actix_web::test]
async fn test_identity_failure_asks_for_new_code() {
    let (context, _) = TestContext::with_student().await;
    let code = request_reset_code(&context).await;
    context.identity.set_simulate_failure(true);
    let app = test_app!(context);

    let body = json!({ "email": STUDENT, "otp": code, "newPassword": NEW_PASSWORD });
    let (status, failed) = post_json!(app, "/api/v1/auth/reset-password", body.clone());
    assert_eq!(status, 500);
    assert_eq!(failed["success"], false);
    assert!(failed["message"].as_str().unwrap().contains("request a new code"));

    // The code was consumed by the first attempt
    context.identity.set_simulate_failure(false);
    let (status, retry) = post_json!(app, "/api/v1/auth/reset-password", body);
    assert_eq!(status, 200);
    assert_eq!(retry["success"], false);
    assert_eq!(retry["message"], "Invalid or expired code");
}
