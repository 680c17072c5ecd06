//! Transfer Workflow
//!
//! A three-step interaction that validates a proposed transfer, asks for
//! explicit confirmation, then debits the sender through the session store.
//!
//! # State Machine
//!
//! ```text
//!            submit() ok                 confirm() ok
//!   FORM ────────────────▶ CONFIRMATION ─────────────▶ RECEIPT
//!     ▲                         │                          │
//!     └──────── back() ─────────┘                          │
//!     └──────────────────── reset() (any state) ───────────┘
//! ```
//!
//! # Invariants
//!
//! 1. **Validate-Before-Confirm**: Receipt is only reachable through a
//!    successful `submit()`
//! 2. **Single Debit**: one in-flight `confirm()` at a time; the balance is
//!    mutated at most once per confirmed transfer
//! 3. **All-or-Nothing**: a failed submission leaves the balance untouched
//!    and the workflow in Confirmation
//! 4. **Reset Is Free**: leaving before Receipt never touches the store
//! 5. **Owned By One Session**: a logout or account switch discards the
//!    pending transfer before anything is submitted or debited

pub mod error;
pub mod state;
pub mod submitter;
pub mod types;
pub mod workflow;

// Re-exports for convenience
pub use error::TransferError;
pub use state::TransferState;
pub use submitter::{SimulatedSubmitter, TransferSubmitter};
pub use types::{OpResult, Party, Receipt, ReceiptId, TransferDraft, TransferSummary};
pub use workflow::TransferWorkflow;
