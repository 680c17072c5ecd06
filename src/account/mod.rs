//! Account management module
//!
//! Account records, register input validation and the repository seam the
//! session store reads and writes through.

pub mod models;
pub mod repository;
pub mod seed;
pub mod validation;

// Re-export commonly used types
pub use models::{Account, AccountId, AccountType, RegisterRequest};
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use validation::{ValidationError, validate_registration};
