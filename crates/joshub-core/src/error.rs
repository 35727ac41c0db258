//! # Error Types
//!
//! Domain-specific error types for joshub-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  joshub-core errors (this file)                                        │
//! │  ├── CoreError        - Entry and checkout rule violations             │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  joshub-db errors (separate crate)                                     │
//! │  └── DbError          - Data store failures                            │
//! │                                                                         │
//! │  backoffice errors (app)                                               │
//! │  ├── CheckoutError    - Which of the two writes failed                 │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
///
/// Raised at the Entry Form and Header Form boundaries. The accumulator
/// itself never fails.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested more units than the product snapshot says are available.
    ///
    /// ## When This Occurs
    /// ```text
    /// Select product (snapshot: 3 available)
    ///      │
    ///      ▼
    /// Enter quantity: 5
    ///      │
    ///      ▼
    /// InsufficientStock { code: "AGUA-600", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Cantidad máxima: 3" next to the field
    /// ```
    ///
    /// The snapshot may be stale, so this is advisory only: the store is
    /// the authority on stock.
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// Tried to check out with no line items.
    #[error("Cannot save a {kind} without line items")]
    EmptyAccumulation { kind: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a form field doesn't meet requirements and are shown
/// inline next to the offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            code: "AGUA-600".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for AGUA-600: available 3, requested 5"
        );

        let err = CoreError::EmptyAccumulation {
            kind: "sale".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot save a sale without line items");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("customer").to_string(),
            "customer is required"
        );

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("product").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
