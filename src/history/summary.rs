//! Dashboard account summary

use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{Transaction, TransactionKind, TransactionStatus};
use crate::account::Account;

/// Number of transactions shown on the dashboard
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub balance: Decimal,
    pub recent: Vec<Transaction>,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub pending_count: usize,
}

/// Summarize an account's history. `txs` is expected newest first.
pub fn summarize(account: &Account, txs: &[Transaction]) -> AccountSummary {
    let total_of = |kind: TransactionKind| -> Decimal {
        txs.iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount)
            .sum()
    };

    AccountSummary {
        balance: account.balance,
        recent: txs.iter().take(RECENT_LIMIT).cloned().collect(),
        total_deposits: total_of(TransactionKind::Credit),
        total_withdrawals: total_of(TransactionKind::Debit),
        pending_count: txs
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Pending)
            .count(),
    }
}
