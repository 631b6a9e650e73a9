use campus_core::services::{EmailServiceTrait, OtpEmail};
use campus_shared::{EmailConfig, Environment};

use crate::email::{create_email_service, render_otp_body, HttpEmailService, MockEmailService};
use crate::InfrastructureError;

fn message(to: &str, otp: &str) -> OtpEmail {
    OtpEmail {
        to: to.to_string(),
        subject: "Verify your email address".to_string(),
        otp: otp.to_string(),
        user_name: None,
    }
}

#[tokio::test]
async fn test_mock_records_messages() {
    let service = MockEmailService::new();

    assert!(service.send_otp_email(&message("a@ncit.edu.np", "111111")).await);
    assert!(service.send_otp_email(&message("a@ncit.edu.np", "222222")).await);

    assert_eq!(service.get_message_count(), 2);
    assert_eq!(
        service.last_code_for("a@ncit.edu.np").await.as_deref(),
        Some("222222")
    );
}

#[tokio::test]
async fn test_mock_failure_records_nothing() {
    let service = MockEmailService::failing();

    assert!(!service.send_otp_email(&message("a@ncit.edu.np", "111111")).await);
    assert!(service.sent_messages().await.is_empty());
}

#[test]
fn test_http_service_requires_url_and_key() {
    let config = EmailConfig {
        provider: "http".to_string(),
        ..EmailConfig::default()
    };
    assert!(HttpEmailService::new(config, 10).is_err());
}

#[tokio::test]
async fn test_http_service_reports_unreachable_endpoint_as_not_sent() {
    let config = EmailConfig {
        provider: "http".to_string(),
        api_url: "http://127.0.0.1:9/send".to_string(),
        api_key: "test-key".to_string(),
        request_timeout_secs: 1,
        ..EmailConfig::default()
    };
    let service = HttpEmailService::new(config, 10).unwrap();

    assert!(!service.send_otp_email(&message("a@ncit.edu.np", "111111")).await);
}

#[tokio::test]
async fn test_factory_builds_mock_outside_production() {
    let service = create_email_service(&EmailConfig::default(), 10, Environment::Development)
        .expect("mock is allowed in development");

    assert!(service.send_otp_email(&message("a@ncit.edu.np", "111111")).await);
}

#[test]
fn test_factory_refuses_mock_in_production() {
    let result = create_email_service(&EmailConfig::default(), 10, Environment::Production);

    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_factory_rejects_unknown_provider() {
    let config = EmailConfig {
        provider: "carrier-pigeon".to_string(),
        ..EmailConfig::default()
    };

    for environment in [Environment::Development, Environment::Production] {
        let result = create_email_service(&config, 10, environment);
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}

#[test]
fn test_factory_surfaces_incomplete_http_config() {
    let config = EmailConfig {
        provider: "http".to_string(),
        api_url: "https://mail.example.com/send".to_string(),
        ..EmailConfig::default()
    };

    let result = create_email_service(&config, 10, Environment::Staging);
    match result {
        Err(InfrastructureError::Config(message)) => assert!(message.contains("EMAIL_API_KEY")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("incomplete HTTP config must not build a service"),
    }
}

#[test]
fn test_factory_builds_http_service_in_production() {
    let config = EmailConfig {
        provider: "http".to_string(),
        api_url: "https://mail.example.com/send".to_string(),
        api_key: "test-key".to_string(),
        ..EmailConfig::default()
    };

    assert!(create_email_service(&config, 10, Environment::Production).is_ok());
}

#[test]
fn test_body_mentions_code_and_expiry() {
    let body = render_otp_body("482913", Some("Asha"), 10);
    assert!(body.starts_with("Hi Asha,"));
    assert!(body.contains("482913"));
    assert!(body.contains("10 minutes"));
}
