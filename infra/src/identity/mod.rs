//! Identity provider module
//!
//! Accounts and credentials live with the hosted identity provider. This
//! module only performs admin password updates on its behalf.

use std::sync::Arc;

use campus_core::services::IdentityProviderTrait;
use campus_shared::{Environment, IdentityConfig};

use crate::InfrastructureError;

pub mod http_identity;
pub mod mock_identity;

pub use http_identity::HttpIdentityProvider;
pub use mock_identity::MockIdentityProvider;

#[cfg(test)]
mod tests;

/// Create an identity provider client based on configuration
///
/// An incomplete HTTP configuration or an unknown provider is an error. The
/// mock provider never changes a password, so it is refused in production.
pub fn create_identity_provider(
    config: &IdentityConfig,
    environment: Environment,
) -> Result<Arc<dyn IdentityProviderTrait>, InfrastructureError> {
    match config.provider.as_str() {
        "http" => {
            let provider = HttpIdentityProvider::new(config.clone())?;
            tracing::info!("HTTP identity provider initialized");
            Ok(Arc::new(provider))
        }
        "mock" if environment.is_production() => Err(InfrastructureError::Config(
            "IDENTITY_PROVIDER=mock is not allowed in production".to_string(),
        )),
        "mock" => {
            tracing::warn!(%environment, "Using mock identity provider, passwords will not change");
            Ok(Arc::new(MockIdentityProvider::new()))
        }
        other => Err(InfrastructureError::Config(format!(
            "unknown identity provider '{}'",
            other
        ))),
    }
}
