//! Transfer Workflow State Definitions

use std::fmt;

/// Transfer workflow states
///
/// Terminal state: RECEIPT (only `reset()` leaves it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferState {
    /// Composing the request: receiver, amount, note
    #[default]
    Form,

    /// Validated request awaiting explicit approval
    Confirmation,

    /// Terminal: balance updated, receipt issued
    Receipt,
}

impl TransferState {
    /// Whether the draft can still be edited
    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self, TransferState::Form)
    }

    /// Check whether `self → next` is a legal step.
    ///
    /// `reset()` is not a step: it discards the workflow from any state.
    pub fn can_transition_to(&self, next: TransferState) -> bool {
        matches!(
            (self, next),
            (TransferState::Form, TransferState::Confirmation)
                | (TransferState::Confirmation, TransferState::Form)
                | (TransferState::Confirmation, TransferState::Receipt)
        )
    }

    /// Get human-readable state name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferState::Form => "FORM",
            TransferState::Confirmation => "CONFIRMATION",
            TransferState::Receipt => "RECEIPT",
        }
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
