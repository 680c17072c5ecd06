//! BankDash - Demo Banking Dashboard Core
//!
//! Session handling, account balances and a confirm-before-commit transfer
//! workflow for a demo banking dashboard.
//!
//! # Modules
//!
//! - [`money`] - KES amount parsing and formatting
//! - [`account`] - Account records, repository and registration rules
//! - [`session`] - Current session, login/register/logout, balance updates
//! - [`transfer`] - Form → Confirmation → Receipt workflow
//! - [`history`] - Transaction log, filters, pagination, CSV export
//! - [`admin`] - Admin overview and user drill-down
//! - [`app`] - Wiring of the above from [`config::AppConfig`]

pub mod config;
pub mod logging;
pub mod money;

pub mod account;
pub mod session;

pub mod admin;
pub mod app;
pub mod history;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountId, AccountType, RegisterRequest};
pub use app::AppState;
pub use config::AppConfig;
pub use history::{Transaction, TransactionFilter, TransactionLog};
pub use session::{AuthError, SessionContext};
pub use transfer::{Receipt, TransferError, TransferState, TransferSummary, TransferWorkflow};
