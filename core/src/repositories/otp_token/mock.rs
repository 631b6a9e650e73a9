//! In-memory implementation of OtpTokenRepository for tests and local runs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{OtpPurpose, OtpToken};
use crate::domain::value_objects::AttemptOutcome;
use crate::errors::DomainError;

use super::r#trait::OtpTokenRepository;

/// Mock token repository
///
/// Verification runs under a single write lock, which gives the same
/// serialization the Postgres row lock provides.
#[derive(Clone, Default)]
pub struct MockOtpTokenRepository {
    tokens: Arc<RwLock<Vec<OtpToken>>>,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
}

impl MockOtpTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `insert`, `supersede_unused` and `delete_expired` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes `verify_and_consume` and `find_latest` fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored token
    pub async fn all(&self) -> Vec<OtpToken> {
        self.tokens.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    fn check_writes(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("token store write failed"));
        }
        Ok(())
    }

    fn check_reads(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("token store read failed"));
        }
        Ok(())
    }
}

#[async_trait]
impl OtpTokenRepository for MockOtpTokenRepository {
    async fn insert(&self, token: OtpToken) -> Result<OtpToken, DomainError> {
        self.check_writes()?;
        self.tokens.write().await.push(token.clone());
        Ok(token)
    }

    async fn verify_and_consume(
        &self,
        email: &str,
        purpose: OtpPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, DomainError> {
        self.check_reads()?;
        let mut tokens = self.tokens.write().await;

        // max_by_key keeps the last maximum, so ties go to the later insert
        let candidate = tokens
            .iter_mut()
            .filter(|t| {
                t.email == email && t.purpose == purpose && !t.is_used && !t.is_expired_at(now)
            })
            .max_by_key(|t| t.created_at);

        match candidate {
            Some(token) => Ok(token.apply_attempt(code, now)),
            None => Ok(AttemptOutcome::NoActiveToken),
        }
    }

    async fn supersede_unused(
        &self,
        email: &str,
        purpose: OtpPurpose,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        self.check_writes()?;
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        for token in tokens.iter_mut() {
            if token.email == email && token.purpose == purpose && !token.is_used {
                token.supersede(now);
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_writes()?;
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|token| !token.is_expired_at(now));

        Ok((initial_count - tokens.len()) as u64)
    }

    async fn find_latest(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpToken>, DomainError> {
        self.check_reads()?;
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .filter(|t| t.email == email && t.purpose == purpose)
            .max_by_key(|t| t.created_at)
            .cloned())
    }
}
