//! # joshub-core: Pure Business Logic for the Back-Office
//!
//! Everything here is a pure function over plain data. The only piece of
//! real business logic in the back-office lives in this crate: the
//! line-item accumulator shared by the sale and delivery-order flows.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Back-Office Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Web Frontend (TypeScript)                       │   │
//! │  │   Entry Form ──► Summary Table ──► Header Form ──► Dashboard    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (ts-rs bindings)                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 backoffice commands                             │   │
//! │  │   submit_sale, submit_order, register_product, ...              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ joshub-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐  ┌─────────┐  │   │
//! │  │   │   types   │  │   money   │  │ accumulation │  │  entry  │  │   │
//! │  │   │  Product  │  │   Money   │  │ Accumulation │  │EntryForm│  │   │
//! │  │   │  Sale     │  │           │  │ DetailRow    │  │PriceTier│  │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘  └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    joshub-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Persisted entities (Customer, Employee, Product, Order, Sale)
//! - [`money`] - Money type with integer arithmetic
//! - [`accumulation`] - The in-progress cart of a sale or order
//! - [`entry`] - Entry form payloads and their validation into line items
//! - [`validation`] - Field-level validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use joshub_core::{Accumulation, CheckoutKind, LineItem, ProductSnapshot};
//!
//! let product = ProductSnapshot {
//!     code: "AGUA-600".to_string(),
//!     name: "Agua 600ml".to_string(),
//!     quantity: 40,
//!     watertight_price_cents: 150_000,
//!     cold_spot_price_cents: 120_000,
//! };
//!
//! let cart = Accumulation::new(CheckoutKind::Order)
//!     .add_or_merge(LineItem::new(product.clone(), 2, 120_000))
//!     .add_or_merge(LineItem::new(product, 3, 120_000));
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total().cents(), 600_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accumulation;
pub mod entry;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use accumulation::{
    Accumulation, CheckoutKind, DetailRow, LineItem, MergePolicy, SummaryLine,
};
pub use entry::{EntryForm, PriceTier};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of rows shown in the dashboard's recent sales and orders lists.
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// Minimum password length accepted for staff logins.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Largest quantity accepted on one entry-form submission.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Largest price or cost accepted, in cents (10.000.000.000 COP).
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000_000;
