//! In-memory transaction log

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{Transaction, TransactionKind, TransactionStatus};
use crate::account::AccountId;

/// Append-only list of transactions across all accounts
#[derive(Default)]
pub struct TransactionLog {
    entries: RwLock<Vec<Transaction>>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Transaction>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Log pre-loaded with the demo transactions
    pub fn seeded() -> Self {
        Self::with_entries(demo_transactions())
    }

    pub async fn append(&self, tx: Transaction) {
        debug!(
            tx_id = %tx.id,
            account_id = %tx.account_id,
            kind = %tx.kind,
            "Transaction appended"
        );
        self.entries.write().await.push(tx);
    }

    /// All entries, newest first. Same-day entries keep most-recently-appended first.
    pub async fn all(&self) -> Vec<Transaction> {
        let mut entries: Vec<Transaction> =
            self.entries.read().await.iter().rev().cloned().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Entries of one account, newest first
    pub async fn for_account(&self, account_id: &AccountId) -> Vec<Transaction> {
        self.all()
            .await
            .into_iter()
            .filter(|tx| &tx.account_id == account_id)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    account_id: &str,
    account_name: &str,
    kind: TransactionKind,
    amount: i64,
    description: &str,
    date: (i32, u32, u32),
    counterparty: Option<&str>,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        account_id: AccountId::new(account_id),
        account_name: account_name.to_string(),
        kind,
        amount: Decimal::from(amount),
        description: description.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
        counterparty: counterparty.map(str::to_string),
        status,
    }
}

/// Demo transactions across the customer accounts
pub fn demo_transactions() -> Vec<Transaction> {
    use TransactionKind::{Credit, Debit};
    use TransactionStatus::{Completed, Failed, Pending};

    vec![
        entry(
            "1",
            "2",
            "Jane Smith",
            Credit,
            5000,
            "Salary deposit",
            (2024, 1, 15),
            Some("Employer"),
            Completed,
        ),
        entry(
            "2",
            "3",
            "Bob Johnson",
            Debit,
            1200,
            "ATM withdrawal",
            (2024, 1, 14),
            None,
            Completed,
        ),
        entry(
            "3",
            "4",
            "Alice Brown",
            Credit,
            2000,
            "Transfer received",
            (2024, 1, 13),
            Some("John Doe"),
            Pending,
        ),
        entry(
            "4",
            "2",
            "Jane Smith",
            Debit,
            800,
            "Online purchase",
            (2024, 1, 12),
            Some("SuperMart"),
            Completed,
        ),
        entry(
            "5",
            "3",
            "Bob Johnson",
            Debit,
            300,
            "Restaurant payment",
            (2024, 1, 11),
            Some("Java House"),
            Failed,
        ),
    ]
}
