//! Mock email service
//!
//! Logs messages instead of sending them and keeps them in memory so tests
//! and local runs can read the code back.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use campus_core::services::{EmailServiceTrait, OtpEmail};
use campus_shared::validation::mask_email;

/// Mock email service for development and testing
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<RwLock<Vec<OtpEmail>>>,
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that reports every send as failed
    pub fn failing() -> Self {
        let service = Self::default();
        service.set_simulate_failure(true);
        service
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Get the total number of messages accepted
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    pub async fn sent_messages(&self) -> Vec<OtpEmail> {
        self.sent.read().await.clone()
    }

    /// Code in the most recent message to `to`
    pub async fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|m| m.to == to)
            .map(|m| m.otp.clone())
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_otp_email(&self, email: &OtpEmail) -> bool {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                to = %mask_email(&email.to),
                "Mock email service simulating failure"
            );
            return false;
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.write().await.push(email.clone());

        debug!(
            to = %mask_email(&email.to),
            subject = %email.subject,
            otp = %email.otp,
            count,
            "[MOCK EMAIL] OTP email recorded"
        );
        true
    }
}
