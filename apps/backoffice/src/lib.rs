//! # Joshub Back-Office Library
//!
//! Commands behind the back-office screens: catalogue, customers, staff,
//! counter sales, delivery orders, and the dashboard.
//!
//! ## Module Organization
//! ```text
//! joshub_backoffice/
//! ├── lib.rs          ◄─── You are here (exports, tracing setup)
//! ├── context.rs      ◄─── AppContext passed to every command
//! ├── checkout.rs     ◄─── Header-then-details write sequence
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cache.rs    ◄─── Query cache with explicit invalidation
//! │   ├── config.rs   ◄─── Env-driven configuration, currency display
//! │   └── session.rs  ◄─── Signed-in staff login
//! ├── commands/
//! │   ├── auth.rs     ◄─── Sign in / out, current employee
//! │   ├── customer.rs ◄─── Customers
//! │   ├── product.rs  ◄─── Products, entry-form snapshot
//! │   ├── employee.rs ◄─── Staff
//! │   ├── order.rs    ◄─── Delivery orders
//! │   ├── sale.rs     ◄─── Counter sales
//! │   └── dashboard.rs◄─── Summary cards
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## A Sale, End to End
//! ```text
//! select_product(ctx, "AGUA-600") ──► ProductSnapshot
//!        │
//!        ▼
//! add_entry(&mut accumulation, EntryForm { product, quantity, tier })
//!        │  (repeat; same code + price merges into one line)
//!        ▼
//! submit_sale(ctx, SaleHeaderForm { customer_id }, &accumulation)
//!        ├── sales header  (total = accumulation total)
//!        └── sales_detail  (one batch, tagged with the header id)
//! ```

pub mod checkout;
pub mod commands;
pub mod context;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use checkout::{add_entry, persist_checkout, summarize, CheckoutError, CheckoutReceipt};
pub use context::AppContext;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppConfig;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,joshub=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=joshub_db=trace` - Trace the data store only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
