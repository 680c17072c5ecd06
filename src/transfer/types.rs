//! Transfer Core Types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::{Account, AccountId};

/// Receipt ID - ULID-based unique identifier
///
/// Displayed as `TXN` followed by the ULID. Unlike a millisecond timestamp,
/// two receipts issued in the same millisecond never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReceiptId(ulid::Ulid);

impl ReceiptId {
    /// Generate a new unique ReceiptId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TXN{}", self.0)
    }
}

impl FromStr for ReceiptId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("TXN").unwrap_or(s);
        Ok(Self(ulid::Ulid::from_string(raw)?))
    }
}

impl Serialize for ReceiptId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReceiptId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Result from the submission step
#[derive(Debug, Clone, PartialEq)]
pub enum OpResult {
    /// Submission accepted
    Success,
    /// Submission rejected; nothing may be applied
    Failed(String),
}

impl OpResult {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, OpResult::Success)
    }
}

/// Values typed into the transfer form.
///
/// Kept verbatim (amount as text) so going back from Confirmation shows
/// exactly what the user entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub receiver_id: Option<AccountId>,
    pub amount: String,
    pub note: String,
}

impl TransferDraft {
    /// Note with surrounding whitespace removed, `None` when blank
    pub fn note(&self) -> Option<String> {
        let note = self.note.trim();
        (!note.is_empty()).then(|| note.to_string())
    }
}

/// One side of a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: AccountId,
    pub name: String,
}

impl From<&Account> for Party {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
        }
    }
}

/// Fully composed request shown for confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSummary {
    pub sender: Party,
    pub receiver: Party,
    pub amount: Decimal,
    pub note: Option<String>,
    /// Sender balance after the debit, as of validation time
    pub resulting_balance: Decimal,
}

/// Record of a completed transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub receipt_id: ReceiptId,
    pub sender: Party,
    pub receiver: Party,
    pub amount: Decimal,
    pub note: Option<String>,
    pub new_balance: Decimal,
    pub completed_at: DateTime<Utc>,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Receipt[{}] {} -> {} amount={} new_balance={}",
            self.receipt_id, self.sender.name, self.receiver.name, self.amount, self.new_balance
        )
    }
}
