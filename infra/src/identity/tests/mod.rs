use uuid::Uuid;

use campus_core::services::IdentityProviderTrait;
use campus_shared::{Environment, IdentityConfig};

use crate::identity::{create_identity_provider, HttpIdentityProvider, MockIdentityProvider};
use crate::InfrastructureError;

fn http_config() -> IdentityConfig {
    IdentityConfig {
        provider: "http".to_string(),
        base_url: "https://project.example.co/".to_string(),
        service_key: "service-key".to_string(),
        request_timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_mock_records_updates() {
    let provider = MockIdentityProvider::new();
    let user_id = Uuid::new_v4();

    provider.update_password(user_id, "correct horse").await.unwrap();

    assert_eq!(provider.updated_users().await, vec![user_id]);
}

#[tokio::test]
async fn test_mock_failure() {
    let provider = MockIdentityProvider::new();
    provider.set_simulate_failure(true);

    assert!(provider.update_password(Uuid::new_v4(), "correct horse").await.is_err());
    assert!(provider.updated_users().await.is_empty());
}

#[test]
fn test_user_url_strips_trailing_slash() {
    let provider = HttpIdentityProvider::new(http_config()).unwrap();
    let id = Uuid::nil();

    assert_eq!(
        provider.user_url(id),
        format!("https://project.example.co/auth/v1/admin/users/{}", id)
    );
}

#[test]
fn test_http_provider_requires_base_url() {
    assert!(HttpIdentityProvider::new(IdentityConfig::default()).is_err());
}

#[tokio::test]
async fn test_unreachable_provider_is_an_error() {
    let provider = HttpIdentityProvider::new(IdentityConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 1,
        ..http_config()
    })
    .unwrap();

    let result = provider.update_password(Uuid::new_v4(), "correct horse").await;
    assert!(result.unwrap_err().starts_with("Identity provider error"));
}

#[tokio::test]
async fn test_factory_builds_mock_outside_production() {
    let provider = create_identity_provider(&IdentityConfig::default(), Environment::Development)
        .expect("mock is allowed in development");

    assert!(provider.update_password(Uuid::new_v4(), "correct horse").await.is_ok());
}

#[test]
fn test_factory_refuses_mock_in_production() {
    let result = create_identity_provider(&IdentityConfig::default(), Environment::Production);

    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_factory_rejects_unknown_provider() {
    let config = IdentityConfig {
        provider: "ldap".to_string(),
        ..IdentityConfig::default()
    };

    let result = create_identity_provider(&config, Environment::Development);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_factory_surfaces_incomplete_http_config() {
    let config = IdentityConfig {
        service_key: String::new(),
        ..http_config()
    };

    let result = create_identity_provider(&config, Environment::Production);
    match result {
        Err(InfrastructureError::Config(message)) => {
            assert!(message.contains("IDENTITY_SERVICE_KEY"))
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("incomplete HTTP config must not build a provider"),
    }
}

#[test]
fn test_factory_builds_http_provider_in_production() {
    assert!(create_identity_provider(&http_config(), Environment::Production).is_ok());
}
