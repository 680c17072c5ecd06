//! Transaction history
//!
//! The seeded transaction log, the customer's history view (filters,
//! pagination, CSV export, dashboard summary). Completed transfers are
//! appended to the same log by the transfer workflow.

pub mod export;
pub mod filter;
pub mod log;
pub mod models;
pub mod summary;
pub mod view;

pub use export::{CSV_HEADERS, HistoryError, export_csv};
pub use filter::{DateRange, KindFilter, Page, TransactionFilter, paginate};
pub use log::TransactionLog;
pub use models::{Transaction, TransactionKind, TransactionStatus};
pub use summary::{AccountSummary, summarize};
pub use view::{HistoryView, HistoryViewError};
