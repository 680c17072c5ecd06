//! Authentication error types

use thiserror::Error;

use crate::account::ValidationError;

#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid registration: {0}")]
    Validation(#[from] ValidationError),

    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Administrator access required")]
    Forbidden,
}

impl AuthError {
    /// Stable error code for display layers
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::EmailTaken(_) => "EMAIL_TAKEN",
            AuthError::Validation(_) => "VALIDATION_FAILED",
            AuthError::NotAuthenticated => "UNAUTHORIZED",
            AuthError::Forbidden => "FORBIDDEN",
        }
    }
}
