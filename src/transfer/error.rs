//! Transfer Error Types

use rust_decimal::Decimal;
use thiserror::Error;

use super::state::TransferState;
use crate::account::AccountId;
use crate::money::format_kes;

/// Transfer error types
///
/// Messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    // === Validation Errors (workflow stays in Form) ===
    #[error("Invalid amount: please enter a valid amount")]
    InvalidAmount,

    #[error("Insufficient funds: available {}, requested {}", kes(.available), kes(.requested))]
    InsufficientFunds { available: Decimal, requested: Decimal },

    #[error("Select recipient: please select a recipient for the transfer")]
    ReceiverMissing,

    #[error("Sender and receiver cannot be the same account")]
    SameAccount,

    #[error("Receiver not found: {0}")]
    ReceiverNotFound(AccountId),

    // === Session Errors ===
    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("The session changed; the pending transfer was discarded")]
    SessionChanged,

    // === Submission Errors (workflow stays in Confirmation) ===
    #[error("A transfer is already being processed")]
    InFlight,

    #[error("Transfer failed: {0}. Please try again.")]
    SubmissionFailed(String),

    #[error("Cannot {action} while in {state}")]
    InvalidStateTransition {
        state: TransferState,
        action: &'static str,
    },
}

fn kes(value: &Decimal) -> String {
    format_kes(*value)
}

impl TransferError {
    /// Get the error code for display layers
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TransferError::ReceiverMissing => "RECEIVER_MISSING",
            TransferError::SameAccount => "SAME_ACCOUNT",
            TransferError::ReceiverNotFound(_) => "RECEIVER_NOT_FOUND",
            TransferError::NotAuthenticated => "UNAUTHORIZED",
            TransferError::SessionChanged => "SESSION_CHANGED",
            TransferError::InFlight => "IN_FLIGHT",
            TransferError::SubmissionFailed(_) => "TRANSFER_FAILED",
            TransferError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
        }
    }

    /// Validation failures are reported on the form and leave the workflow in Form
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TransferError::InvalidAmount
                | TransferError::InsufficientFunds { .. }
                | TransferError::ReceiverMissing
                | TransferError::SameAccount
                | TransferError::ReceiverNotFound(_)
        )
    }
}
