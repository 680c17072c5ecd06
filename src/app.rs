//! Application state shared by every front-end command

use std::sync::Arc;

use tracing::info;

use crate::account::{AccountRepository, InMemoryAccountRepository};
use crate::admin::AdminView;
use crate::config::AppConfig;
use crate::history::{HistoryView, TransactionLog};
use crate::session::{FileSessionStore, SessionContext, SessionStore};
use crate::transfer::{SimulatedSubmitter, TransferSubmitter, TransferWorkflow};

/// Wired-up application (shared)
#[derive(Clone)]
pub struct AppState {
    /// Session and balance authority
    pub session: Arc<SessionContext>,
    /// History of every account
    pub ledger: Arc<TransactionLog>,
    /// Transfer screen
    pub transfer: Arc<TransferWorkflow>,
    pub history: Arc<HistoryView>,
    pub admin: Arc<AdminView>,
}

impl AppState {
    /// Seeded accounts, file-backed session mirror and simulated submission
    pub fn from_config(config: AppConfig) -> Self {
        let store = Arc::new(FileSessionStore::new(
            config.session.storage_path(),
            &config.session.key,
        ));
        let submitter = Arc::new(SimulatedSubmitter::from_config(&config.transfer));
        Self::new(
            &config,
            Arc::new(InMemoryAccountRepository::seeded()),
            store,
            Arc::new(TransactionLog::seeded()),
            submitter,
        )
    }

    pub fn new(
        config: &AppConfig,
        accounts: Arc<dyn AccountRepository>,
        store: Arc<dyn SessionStore>,
        ledger: Arc<TransactionLog>,
        submitter: Arc<dyn TransferSubmitter>,
    ) -> Self {
        let session = Arc::new(SessionContext::new(accounts, store, &config.auth));
        let transfer = Arc::new(TransferWorkflow::new(
            session.clone(),
            ledger.clone(),
            submitter,
            &config.transfer,
        ));
        let history = Arc::new(HistoryView::new(
            session.clone(),
            ledger.clone(),
            config.history.page_size,
        ));
        let admin = Arc::new(AdminView::new(session.clone(), ledger.clone(), &config.history));

        Self {
            session,
            ledger,
            transfer,
            history,
            admin,
        }
    }

    /// Pick up the session persisted by an earlier run
    pub async fn restore(&self) {
        match self.session.restore().await {
            Some(account) => info!(account_id = %account.id, "Resumed session"),
            None => info!("Starting without a session"),
        }
    }
}
