//! # Validation Module
//!
//! Field-level validation for the back-office forms.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  └── Required markers, input masks                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: backoffice commands (Rust)                                   │
//! │  ├── Deserialization (numeric strings coerced once)                    │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Data store (SQLite)                                          │
//! │  ├── PRIMARY KEY / UNIQUE                                              │
//! │  └── FOREIGN KEY (customer, employee, product)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use joshub_core::validation::{validate_code, validate_quantity};
//!
//! assert!(validate_code("AGUA-600").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_PRICE_CENTS, MAX_QUANTITY, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_CODE_LENGTH: usize = 50;
const MAX_NAME_LENGTH: usize = 200;
const MAX_ADDRESS_LENGTH: usize = 300;
const MAX_IDENTIFIER_LENGTH: usize = 20;

// =============================================================================
// String Validators
// =============================================================================

/// Trims a required text field, failing when nothing is left.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value.to_string())
}

fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use joshub_core::validation::validate_code;
///
/// assert!(validate_code("AGUA-600").is_ok());
/// assert!(validate_code("").is_err());
/// assert!(validate_code("AGUA 600").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<String> {
    let code = validate_required("code", code)?;
    validate_max_len("code", &code, MAX_CODE_LENGTH)?;

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code)
}

/// Validates a display name (customer, employee or product).
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = validate_required("name", name)?;
    validate_max_len("name", &name, MAX_NAME_LENGTH)?;
    Ok(name)
}

/// Validates a national identification number used as customer or
/// employee id.
///
/// Digits only, at most 20 of them.
pub fn validate_identifier(field: &str, id: &str) -> ValidationResult<String> {
    let id = validate_required(field, id)?;
    validate_max_len(field, &id, MAX_IDENTIFIER_LENGTH)?;

    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(id)
}

/// Validates a phone number: digits with an optional leading `+`,
/// 7 to 15 digits.
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = validate_required("phone", phone)?;
    let digits = phone.strip_prefix('+').unwrap_or(&phone);

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !(7..=15).contains(&digits.len()) {
        return Err(ValidationError::OutOfRange {
            field: "phone digits".to_string(),
            min: 7,
            max: 15,
        });
    }

    Ok(phone)
}

/// Validates a login email. Only the shape is checked.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email)?.to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };

    if !valid || email.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(email)
}

/// Validates a login password (minimum length only).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Validates a delivery address.
pub fn validate_address(address: &str) -> ValidationResult<String> {
    let address = validate_required("address", address)?;
    validate_max_len("address", &address, MAX_ADDRESS_LENGTH)?;
    Ok(address)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity: 1 to [`MAX_QUANTITY`].
///
/// ```text
/// Entry form: quantity "3"
///      │  (coerced to 3 on deserialize)
///      ▼
/// validate_quantity(3) ← THIS FUNCTION
///      │
///      ├── qty <= 0? → "quantity must be positive"
///      ├── qty > MAX_QUANTITY? → "quantity must be between 1 and 1000000"
///      └── OK → stock check → LineItem
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validates units on hand for a product record (zero allowed).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a price or cost in cents: 0 to [`MAX_PRICE_CENTS`].
///
/// ```rust
/// use joshub_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("price", 0).is_ok());
/// assert!(validate_price_cents("price", -1).is_err());
/// assert!(validate_price_cents("price", i64::MAX).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
