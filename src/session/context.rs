//! Session context: current account, login/register/logout and the single
//! balance mutation.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::error::AuthError;
use super::store::SessionStore;
use crate::account::{Account, AccountId, AccountRepository, RegisterRequest, validate_registration};
use crate::config::AuthConfig;

/// Explicit session object shared (via `Arc`) with every view and workflow.
///
/// At most one account is current. All reads return snapshots; the only
/// way to change a balance is [`SessionContext::update_balance`].
pub struct SessionContext {
    accounts: Arc<dyn AccountRepository>,
    store: Arc<dyn SessionStore>,
    demo_password: String,
    current: RwLock<Option<Account>>,
}

impl SessionContext {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        store: Arc<dyn SessionStore>,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            accounts,
            store,
            demo_password: auth.demo_password.clone(),
            current: RwLock::new(None),
        }
    }

    /// Restore the session from the persisted mirror.
    ///
    /// The mirrored record is written back into the repository so balances
    /// changed in an earlier run stay visible. A corrupt mirror is logged and
    /// treated as no session.
    pub async fn restore(&self) -> Option<Account> {
        let account = match self.store.load().await {
            Ok(Some(account)) => account,
            Ok(None) => {
                debug!("No stored session");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session mirror");
                return None;
            }
        };

        self.accounts.upsert(account.clone()).await;
        *self.current.write().await = Some(account.clone());
        info!(account_id = %account.id, "Session restored");
        Some(account)
    }

    /// Snapshot of the current account
    pub async fn current(&self) -> Option<Account> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn require_current(&self) -> Result<Account, AuthError> {
        self.current().await.ok_or(AuthError::NotAuthenticated)
    }

    pub async fn require_admin(&self) -> Result<Account, AuthError> {
        let account = self.require_current().await?;
        if !account.is_admin {
            return Err(AuthError::Forbidden);
        }
        Ok(account)
    }

    /// Log in with an email and the shared demo credential.
    ///
    /// On failure nothing changes, including any existing session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let account = match self.accounts.get_by_email(email).await {
            Some(account) if password == self.demo_password => account,
            _ => {
                warn!(email = %email.trim(), "Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        self.start_session(&account).await;
        info!(account_id = %account.id, "Login succeeded");
        Ok(account)
    }

    /// Create a non-admin account and make it the current session.
    pub async fn register(&self, req: RegisterRequest) -> Result<Account, AuthError> {
        validate_registration(&req)?;

        if self.accounts.get_by_email(&req.email).await.is_some() {
            return Err(AuthError::EmailTaken(req.email.trim().to_string()));
        }

        let account = req.into_account(AccountId::generate());
        self.accounts.upsert(account.clone()).await;
        self.start_session(&account).await;

        info!(
            account_id = %account.id,
            account_type = %account.account_type,
            "Account registered"
        );
        Ok(account)
    }

    /// Clear the session and its mirror. Safe to call when logged out.
    pub async fn logout(&self) {
        let previous = self.current.write().await.take();
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear session mirror");
        }
        if let Some(account) = previous {
            info!(account_id = %account.id, "Logged out");
        }
    }

    /// Replace the balance of `account_id`.
    ///
    /// No bounds checking: callers validate. Unknown accounts are ignored.
    /// When the account is the current session, the session record and the
    /// mirror are updated before this returns.
    pub async fn update_balance(&self, account_id: &AccountId, new_balance: Decimal) {
        let Some(mut account) = self.accounts.get_by_id(account_id).await else {
            debug!(account_id = %account_id, "update_balance: account not found");
            return;
        };

        let old_balance = account.balance;
        account.balance = new_balance;
        self.accounts.upsert(account.clone()).await;

        let mut current = self.current.write().await;
        if let Some(session) = current.as_mut()
            && &session.id == account_id
        {
            session.balance = new_balance;
            self.persist(session).await;
        }

        info!(
            account_id = %account_id,
            old_balance = %old_balance,
            new_balance = %new_balance,
            "Balance updated"
        );
    }

    /// Authoritative balance for any account
    pub async fn balance_of(&self, account_id: &AccountId) -> Option<Decimal> {
        self.accounts.get_by_id(account_id).await.map(|a| a.balance)
    }

    pub fn accounts(&self) -> &Arc<dyn AccountRepository> {
        &self.accounts
    }

    async fn start_session(&self, account: &Account) {
        *self.current.write().await = Some(account.clone());
        self.persist(account).await;
    }

    /// Mirror writes never fail the calling operation
    async fn persist(&self, account: &Account) {
        if let Err(e) = self.store.save(account).await {
            warn!(account_id = %account.id, error = %e, "Failed to write session mirror");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountType, InMemoryAccountRepository};
    use crate::session::{MemorySessionStore, SessionStoreError};
    use async_trait::async_trait;

    fn context() -> (SessionContext, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let ctx = SessionContext::new(
            Arc::new(InMemoryAccountRepository::seeded()),
            store.clone(),
            &AuthConfig::default(),
        );
        (ctx, store)
    }

    #[tokio::test]
    async fn test_login_success_sets_and_persists_session() {
        let (ctx, store) = context();

        let account = ctx.login("jane@example.com", "password").await.unwrap();
        assert_eq!(account.name, "Jane Smith");
        assert_eq!(ctx.current().await, Some(account.clone()));
        assert_eq!(store.load().await.unwrap(), Some(account));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_unchanged() {
        let (ctx, store) = context();
        ctx.login("bob@example.com", "password").await.unwrap();

        let err = ctx.login("jane@example.com", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        let err = ctx.login("ghost@example.com", "password").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);

        assert_eq!(ctx.current().await.unwrap().name, "Bob Johnson");
        assert_eq!(store.load().await.unwrap().unwrap().name, "Bob Johnson");
    }

    #[tokio::test]
    async fn test_register_creates_non_admin_session() {
        let (ctx, store) = context();
        let req = RegisterRequest::new("Mary Wanjiku", "mary@example.com", AccountType::Savings);

        let account = ctx.register(req).await.unwrap();
        assert!(!account.is_admin);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(ctx.accounts().list().await.len(), 5);
        assert_eq!(store.load().await.unwrap(), Some(account));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_and_invalid() {
        let (ctx, _store) = context();

        let dup = RegisterRequest::new("Jane Again", "Jane@Example.com", AccountType::Savings);
        assert!(matches!(ctx.register(dup).await, Err(AuthError::EmailTaken(_))));

        let bad = RegisterRequest::new("Nobody", "nope", AccountType::Checking);
        assert!(matches!(ctx.register(bad).await, Err(AuthError::Validation(_))));

        assert!(ctx.current().await.is_none());
        assert_eq!(ctx.accounts().list().await.len(), 4);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (ctx, store) = context();
        ctx.login("alice@example.com", "password").await.unwrap();

        ctx.logout().await;
        assert!(!ctx.is_authenticated().await);
        assert!(store.raw().await.is_none());

        ctx.logout().await;
        assert!(!ctx.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_update_balance_reads_back() {
        let (ctx, store) = context();
        ctx.login("admin@bank.com", "password").await.unwrap();
        let admin_id = AccountId::new("1");
        let bob_id = AccountId::new("3");

        ctx.update_balance(&admin_id, Decimal::from(48_000)).await;
        assert_eq!(ctx.balance_of(&admin_id).await, Some(Decimal::from(48_000)));
        assert_eq!(ctx.current().await.unwrap().balance, Decimal::from(48_000));
        assert_eq!(store.load().await.unwrap().unwrap().balance, Decimal::from(48_000));

        // non-session accounts update the repository only
        ctx.update_balance(&bob_id, Decimal::from(1)).await;
        assert_eq!(ctx.balance_of(&bob_id).await, Some(Decimal::ONE));
        assert_eq!(store.load().await.unwrap().unwrap().id, admin_id);
    }

    #[tokio::test]
    async fn test_update_balance_unknown_account_is_noop() {
        let (ctx, _store) = context();
        let before = ctx.accounts().list().await;

        ctx.update_balance(&AccountId::new("missing"), Decimal::from(10)).await;
        assert_eq!(ctx.accounts().list().await, before);
    }

    #[tokio::test]
    async fn test_restore_from_mirror() {
        let store = Arc::new(MemorySessionStore::new());
        let mut jane = crate::account::seed::demo_accounts().remove(1);
        jane.balance = Decimal::from(25);
        store.save(&jane).await.unwrap();

        let ctx = SessionContext::new(
            Arc::new(InMemoryAccountRepository::seeded()),
            store,
            &AuthConfig::default(),
        );
        assert_eq!(ctx.restore().await, Some(jane.clone()));
        assert_eq!(ctx.current().await, Some(jane.clone()));
        // the mirrored balance wins over the seed
        assert_eq!(ctx.balance_of(&jane.id).await, Some(Decimal::from(25)));
    }

    #[tokio::test]
    async fn test_require_admin() {
        let (ctx, _store) = context();
        assert_eq!(ctx.require_admin().await, Err(AuthError::NotAuthenticated));

        ctx.login("jane@example.com", "password").await.unwrap();
        assert_eq!(ctx.require_admin().await, Err(AuthError::Forbidden));

        ctx.login("admin@bank.com", "password").await.unwrap();
        assert!(ctx.require_admin().await.is_ok());
    }

    struct BrokenStore;

    #[async_trait]
    impl SessionStore for BrokenStore {
        async fn load(&self) -> Result<Option<Account>, SessionStoreError> {
            Err(std::io::Error::other("disk gone").into())
        }
        async fn save(&self, _account: &Account) -> Result<(), SessionStoreError> {
            Err(std::io::Error::other("disk gone").into())
        }
        async fn clear(&self) -> Result<(), SessionStoreError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    #[tokio::test]
    async fn test_mirror_failures_do_not_fail_operations() {
        let ctx = SessionContext::new(
            Arc::new(InMemoryAccountRepository::seeded()),
            Arc::new(BrokenStore),
            &AuthConfig::default(),
        );

        assert!(ctx.restore().await.is_none());
        assert!(ctx.login("bob@example.com", "password").await.is_ok());
        ctx.update_balance(&AccountId::new("3"), Decimal::from(100)).await;
        assert_eq!(ctx.current().await.unwrap().balance, Decimal::from(100));
        ctx.logout().await;
        assert!(ctx.current().await.is_none());
    }
}
