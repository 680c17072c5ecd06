//! Demo accounts loaded into a fresh repository

use rust_decimal::Decimal;

use super::models::{Account, AccountId, AccountType};

#[allow(clippy::too_many_arguments)]
fn account(
    id: &str,
    name: &str,
    email: &str,
    balance: i64,
    account_type: AccountType,
    is_admin: bool,
    address: &str,
    phone: &str,
) -> Account {
    Account {
        id: AccountId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        balance: Decimal::from(balance),
        account_type,
        is_admin,
        address: Some(address.to_string()),
        phone: Some(phone.to_string()),
    }
}

/// The four demo accounts: one administrator and three customers
pub fn demo_accounts() -> Vec<Account> {
    vec![
        account(
            "1",
            "John Doe",
            "admin@bank.com",
            50_000,
            AccountType::Checking,
            true,
            "123 Admin St, Nairobi",
            "+254700000001",
        ),
        account(
            "2",
            "Jane Smith",
            "jane@example.com",
            75,
            AccountType::Savings,
            false,
            "456 User Ave, Mombasa",
            "+254700000002",
        ),
        account(
            "3",
            "Bob Johnson",
            "bob@example.com",
            15_000,
            AccountType::Checking,
            false,
            "789 Client Rd, Kisumu",
            "+254700000003",
        ),
        account(
            "4",
            "Alice Brown",
            "alice@example.com",
            50,
            AccountType::Savings,
            false,
            "321 Customer Blvd, Eldoret",
            "+254700000004",
        ),
    ]
}
