//! Repository layer for account records
//!
//! The session store and transfer workflow only see [`AccountRepository`];
//! the in-memory implementation below stands in for a real database.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{Account, AccountId};
use super::seed;

/// Account lookup and storage
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get account by ID
    async fn get_by_id(&self, id: &AccountId) -> Option<Account>;

    /// Get account by email (case-insensitive)
    async fn get_by_email(&self, email: &str) -> Option<Account>;

    /// All accounts, in insertion order
    async fn list(&self) -> Vec<Account>;

    /// Insert a new account or replace the record with the same ID
    async fn upsert(&self, account: Account);
}

/// In-memory repository preserving insertion order
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Repository pre-loaded with the demo accounts
    pub fn seeded() -> Self {
        Self::with_accounts(seed::demo_accounts())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get_by_id(&self, id: &AccountId) -> Option<Account> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }

    async fn get_by_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.has_email(email))
            .cloned()
    }

    async fn list(&self) -> Vec<Account> {
        self.accounts.read().await.clone()
    }

    async fn upsert(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        match accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => {
                debug!(account_id = %account.id, "Account replaced");
                *existing = account;
            }
            None => {
                debug!(account_id = %account.id, "Account inserted");
                accounts.push(account);
            }
        }
    }
}
