//! Data models for bank accounts

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::ValidationError;

// ============================================================================
// AccountId
// ============================================================================

/// Opaque account identifier.
///
/// Seeded accounts keep their short numeric ids; registered accounts get a ULID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, sortable identifier
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// AccountType
// ============================================================================

/// Account category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Savings,
    Checking,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Checking => "Checking",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "checking" => Ok(AccountType::Checking),
            _ => Err(ValidationError::InvalidFormat {
                field: "account_type",
                value: s.to_string(),
                expected: "Savings or Checking",
            }),
        }
    }
}

// ============================================================================
// Account
// ============================================================================

/// A user's banking identity and balance record.
///
/// This is also the exact shape written to the session mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub balance: Decimal,
    pub account_type: AccountType,
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Account {
    /// `"Jane Smith (jane@example.com)"`, as listed in the receiver picker
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

// ============================================================================
// RegisterRequest
// ============================================================================

/// Sign-up form data
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "name must be 1-64 characters"))]
    pub name: String,
    #[validate(email(message = "email address is not valid"))]
    pub email: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            account_type,
            address: None,
            phone: None,
        }
    }

    /// Build the account record a successful registration creates.
    ///
    /// New accounts are never administrators and start with a zero balance.
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            balance: Decimal::ZERO,
            account_type: self.account_type,
            is_admin: false,
            address: self.address,
            phone: self.phone,
        }
    }
}
