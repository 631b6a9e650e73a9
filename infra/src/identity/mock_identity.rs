//! Mock identity provider for development and testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use campus_core::services::IdentityProviderTrait;

#[derive(Clone, Default)]
pub struct MockIdentityProvider {
    /// Ids whose password was updated, in order
    updated: Arc<RwLock<Vec<Uuid>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    pub async fn updated_users(&self) -> Vec<Uuid> {
        self.updated.read().await.clone()
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn update_password(&self, user_id: Uuid, _new_password: &str) -> Result<(), String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(user_id = %user_id, "Mock identity provider simulating failure");
            return Err("Simulated identity provider failure".to_string());
        }

        self.updated.write().await.push(user_id);
        info!(user_id = %user_id, "[MOCK IDENTITY] Password updated");
        Ok(())
    }
}
