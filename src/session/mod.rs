//! Session / Account Store
//!
//! Who is logged in and what their balance is. The [`SessionContext`] is
//! the single writer of balances (`update_balance`) and keeps the
//! persisted mirror in step with the in-memory session record.
//!
//! # Lifecycle
//!
//! ```text
//! restore() ──▶ [session?] ──login()/register()──▶ [session] ──logout()──▶ [none]
//!                                   │
//!                           update_balance() (repo + session + mirror)
//! ```

pub mod context;
pub mod error;
pub mod store;

pub use context::SessionContext;
pub use error::AuthError;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError};
