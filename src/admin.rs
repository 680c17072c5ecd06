//! Admin dashboard: customer overview and per-user drill-down.
//!
//! Every operation requires the current session to be an admin.
//! Transaction lists are paginated with the history page size; the
//! customer list is not.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::{Account, AccountId};
use crate::config::HistoryConfig;
use crate::history::{Page, Transaction, TransactionFilter, TransactionLog, paginate};
use crate::session::{AuthError, SessionContext};

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    /// Non-admin accounts
    pub total_users: usize,
    /// Non-admin accounts below the low-balance threshold
    pub low_balance_users: usize,
    pub total_transactions: usize,
    /// Sum of every transaction amount regardless of direction
    pub total_volume: Decimal,
}

/// Badge shown next to each customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerStatus {
    Active,
    /// Balance below the low-balance threshold
    LowBalance,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "Active",
            CustomerStatus::LowBalance => "Low Balance",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRow {
    pub account: Account,
    pub status: CustomerStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetail {
    pub account: Account,
    pub status: CustomerStatus,
    /// Newest first
    pub transactions: Page<Transaction>,
}

pub struct AdminView {
    session: Arc<SessionContext>,
    ledger: Arc<TransactionLog>,
    low_balance_threshold: Decimal,
    page_size: usize,
}

impl AdminView {
    pub fn new(
        session: Arc<SessionContext>,
        ledger: Arc<TransactionLog>,
        config: &HistoryConfig,
    ) -> Self {
        Self {
            session,
            ledger,
            low_balance_threshold: Decimal::from(config.low_balance_threshold),
            page_size: config.page_size,
        }
    }

    pub fn status_of(&self, account: &Account) -> CustomerStatus {
        if account.balance < self.low_balance_threshold {
            CustomerStatus::LowBalance
        } else {
            CustomerStatus::Active
        }
    }

    pub async fn overview(&self) -> Result<AdminOverview, AuthError> {
        self.session.require_admin().await?;

        let customers = self.customers().await;
        let txs = self.ledger.all().await;

        Ok(AdminOverview {
            total_users: customers.len(),
            low_balance_users: customers
                .iter()
                .filter(|a| self.status_of(a) == CustomerStatus::LowBalance)
                .count(),
            total_transactions: txs.len(),
            total_volume: txs.iter().map(|tx| tx.amount).sum(),
        })
    }

    /// Customers whose name or email contains `search` (case-insensitive).
    /// An empty search returns every customer.
    pub async fn users(&self, search: &str) -> Result<Vec<CustomerRow>, AuthError> {
        self.session.require_admin().await?;

        let needle = search.trim().to_lowercase();
        Ok(self
            .customers()
            .await
            .into_iter()
            .filter(|a| {
                needle.is_empty()
                    || a.name.to_lowercase().contains(&needle)
                    || a.email.to_lowercase().contains(&needle)
            })
            .map(|account| CustomerRow {
                status: self.status_of(&account),
                account,
            })
            .collect())
    }

    /// One account with a page of its history
    pub async fn user_detail(
        &self,
        id: &AccountId,
        page: usize,
    ) -> Result<Option<UserDetail>, AuthError> {
        self.session.require_admin().await?;

        let Some(account) = self.session.accounts().get_by_id(id).await else {
            return Ok(None);
        };
        let txs = self.ledger.for_account(id).await;
        Ok(Some(UserDetail {
            status: self.status_of(&account),
            account,
            transactions: paginate(&txs, page, self.page_size),
        }))
    }

    /// One page of filtered history across every account
    pub async fn transactions(
        &self,
        filter: &TransactionFilter,
        page: usize,
        today: NaiveDate,
    ) -> Result<Page<Transaction>, AuthError> {
        self.session.require_admin().await?;
        let txs = self.ledger.all().await;
        Ok(paginate(&filter.apply(&txs, today), page, self.page_size))
    }

    async fn customers(&self) -> Vec<Account> {
        self.session
            .accounts()
            .list()
            .await
            .into_iter()
            .filter(|a| !a.is_admin)
            .collect()
    }
}
