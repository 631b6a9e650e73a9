//! Mock collaborators for testing the composite flows

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::services::auth::{EmailServiceTrait, IdentityProviderTrait, OtpEmail};

// Mock email service for testing
pub struct MockEmailService {
    pub sent: Arc<Mutex<Vec<OtpEmail>>>,
    pub should_fail: bool,
}

impl MockEmailService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.to == to)
            .map(|m| m.otp.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_otp_email(&self, email: &OtpEmail) -> bool {
        // Recorded even on failure so tests can still read the code
        self.sent.lock().unwrap().push(email.clone());
        !self.should_fail
    }
}

// Mock identity provider for testing
pub struct MockIdentityProvider {
    pub updates: Arc<Mutex<Vec<(Uuid, String)>>>,
    pub should_fail: bool,
}

impl MockIdentityProvider {
    pub fn new(should_fail: bool) -> Self {
        Self {
            updates: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn update_password(&self, user_id: Uuid, new_password: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("identity provider error".to_string());
        }
        self.updates
            .lock()
            .unwrap()
            .push((user_id, new_password.to_string()));
        Ok(())
    }
}
