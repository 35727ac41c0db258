//! # API Error Type
//!
//! Unified error type for back-office commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Back-Office                        │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  submitSale(form, cart)                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function: ApiResult<T>                                  │  │
//! │  │         │                                                        │  │
//! │  │  ValidationError / CoreError ──────────────────┐                │  │
//! │  │  DbError ──────────────────────────────────────┤                │  │
//! │  │  CheckoutError::HeaderWrite ───────────────────┼──► ApiError ──►│  │
//! │  │  CheckoutError::DetailWrite ───────────────────┤                │  │
//! │  │  ConfigError ──────────────────────────────────┘                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "PARTIAL_CHECKOUT"                                       │
//! │    // e.message = "Sale #42 was saved but its lines were not ..."       │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::checkout::CheckoutError;
use crate::state::ConfigError;
use joshub_core::{CoreError, ValidationError};
use joshub_db::{AuthError, DbError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CHECKOUT_FAILED",
///   "message": "Could not save the sale: unknown customer or employee"
/// }
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed (shown next to the field)
    ValidationError,

    /// Requested more units than the selected product showed
    InsufficientStock,

    /// No signed-in user, or bad credentials
    Unauthorized,

    /// Header write failed; nothing was saved
    CheckoutFailed,

    /// Header saved, detail rows not saved
    PartialCheckout,

    /// Database operation failed
    DatabaseError,

    /// Invalid configuration
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, .. } => {
                ApiError::validation(format!("{} already exists", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Auth(AuthError::InvalidCredentials) => {
                ApiError::unauthorized("Invalid email or password")
            }
            DbError::Auth(AuthError::Hashing(e)) => {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal("Could not process the password")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                code,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    code, available, requested
                ),
            ),
            e @ CoreError::EmptyAccumulation { .. } => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts checkout failures, keeping which write failed.
impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Rejected(core) => core.into(),
            CheckoutError::HeaderWrite { kind, source } => {
                let reason = if source.is_foreign_key_violation() {
                    "unknown customer or employee".to_string()
                } else {
                    source.to_string()
                };
                ApiError::new(
                    ErrorCode::CheckoutFailed,
                    format!("Could not save the {}: {}", kind, reason),
                )
            }
            CheckoutError::DetailWrite {
                kind,
                header_id,
                source,
            } => ApiError::new(
                ErrorCode::PartialCheckout,
                format!(
                    "The {} #{} was saved but its lines were not: {}",
                    kind, header_id, source
                ),
            ),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
