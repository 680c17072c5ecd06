//! Input validation for account registration
//!
//! Declarative checks live on [`RegisterRequest`] (via `validator`); the
//! rules that need hand-written logic live here.

use super::models::RegisterRequest;
use validator::Validate;

// ============================================================================
// Validation Errors
// ============================================================================

/// Validation errors for registration input
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid length for {field}: expected {min}-{max}, got {actual}")]
    InvalidLength {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Invalid format for {field}: '{value}' (expected: {expected})")]
    InvalidFormat {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid {field}: {message}")]
    Rejected { field: String, message: String },
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                ValidationError::Rejected {
                    field: field.to_string(),
                    message,
                }
            }
            None => ValidationError::Rejected {
                field: "request".to_string(),
                message: errors.to_string(),
            },
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Validate a sign-up request before an account is created.
///
/// # Validation Rules
/// - name: 1-64 characters after trimming
/// - email: syntactically valid address
/// - phone (optional): `+` then 7-15 digits, or 7-15 digits
pub fn validate_registration(req: &RegisterRequest) -> Result<(), ValidationError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidLength {
            field: "name",
            min: 1,
            max: 64,
            actual: 0,
        });
    }

    req.validate()?;

    if let Some(phone) = req.phone.as_deref() {
        validate_phone(phone)?;
    }

    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    let digits = phone.strip_prefix('+').unwrap_or(phone);

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone",
            value: phone.to_string(),
            expected: "optional '+' followed by digits",
        });
    }

    if digits.len() < 7 || digits.len() > 15 {
        return Err(ValidationError::InvalidLength {
            field: "phone",
            min: 7,
            max: 15,
            actual: digits.len(),
        });
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
