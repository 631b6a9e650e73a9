//! In-memory implementation of AccountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::DomainError;

use super::r#trait::AccountRepository;

#[derive(Debug, Clone)]
struct AccountRecord {
    id: Uuid,
    email_verified_at: Option<DateTime<Utc>>,
}

/// Mock account repository keyed by normalized email
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<String, AccountRecord>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account and returns its id
    pub async fn add_account(&self, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.accounts.write().await.insert(
            email.to_string(),
            AccountRecord {
                id,
                email_verified_at: None,
            },
        );
        id
    }

    pub async fn email_verified_at(&self, email: &str) -> Option<DateTime<Utc>> {
        self.accounts
            .read()
            .await
            .get(email)
            .and_then(|a| a.email_verified_at)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("account store error"));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_account_id_by_email(&self, email: &str) -> Result<Option<Uuid>, DomainError> {
        self.check()?;
        Ok(self.accounts.read().await.get(email).map(|a| a.id))
    }

    async fn mark_email_verified(
        &self,
        email: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(email) {
            Some(account) => {
                account.email_verified_at = Some(verified_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
