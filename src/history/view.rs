//! The logged-in customer's view of their own history

use std::sync::Arc;

use chrono::NaiveDate;

use super::export::{HistoryError, export_csv};
use super::filter::{Page, TransactionFilter, paginate};
use super::log::TransactionLog;
use super::models::Transaction;
use super::summary::{AccountSummary, summarize};
use crate::session::{AuthError, SessionContext};

pub struct HistoryView {
    session: Arc<SessionContext>,
    log: Arc<TransactionLog>,
    page_size: usize,
}

impl HistoryView {
    pub fn new(session: Arc<SessionContext>, log: Arc<TransactionLog>, page_size: usize) -> Self {
        Self {
            session,
            log,
            page_size,
        }
    }

    /// Filtered history of the current account, newest first
    pub async fn transactions(
        &self,
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> Result<Vec<Transaction>, AuthError> {
        let account = self.session.require_current().await?;
        let txs = self.log.for_account(&account.id).await;
        Ok(filter.apply(&txs, today))
    }

    pub async fn page(
        &self,
        filter: &TransactionFilter,
        page: usize,
        today: NaiveDate,
    ) -> Result<Page<Transaction>, AuthError> {
        let txs = self.transactions(filter, today).await?;
        Ok(paginate(&txs, page, self.page_size))
    }

    /// CSV of every filtered transaction (not just the current page)
    pub async fn export(
        &self,
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> Result<String, HistoryViewError> {
        let txs = self.transactions(filter, today).await?;
        Ok(export_csv(&txs)?)
    }

    pub async fn summary(&self) -> Result<AccountSummary, AuthError> {
        let account = self.session.require_current().await?;
        let txs = self.log.for_account(&account.id).await;
        Ok(summarize(&account, &txs))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum HistoryViewError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Export(#[from] HistoryError),
}
