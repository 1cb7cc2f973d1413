use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::ports::AccountRepository;

/// Account store held in process memory, keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn find_by_stored_token(&self, token: &str) -> Result<Option<Account>, AuthError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.stored_token.as_deref() == Some(token))
            .cloned())
    }

    async fn save(&self, account: &Account) -> Result<(), AuthError> {
        let mut accounts = self.accounts.write().await;

        if let Some(existing) = accounts.get(account.email.as_str()) {
            if existing.id != account.id {
                return Err(AuthError::DuplicateEmail(account.email.to_string()));
            }
        }

        accounts.insert(account.email.as_str().to_string(), account.clone());
        Ok(())
    }
}
