//! # joshub-db: Data Store Layer for the Back-Office
//!
//! SQLite persistence through sqlx: pool, embedded migrations, and one
//! repository per table group.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Back-Office Data Flow                            │
//! │                                                                         │
//! │  backoffice command (submit_sale)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     joshub-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ Customer      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Employee      │    │ 001_initial  │  │   │
//! │  │   │               │    │ Product       │    │ _schema.sql  │  │   │
//! │  │   │               │    │ Order / Sale  │    │              │  │   │
//! │  │   │               │    │ Auth / Dash.  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (joshub.db)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use joshub_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("joshub.db")).await?;
//! let products = db.products().list_active().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{AuthError, DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::auth::{AuthRepository, AuthUser};
pub use repository::customer::CustomerRepository;
pub use repository::dashboard::{DashboardRepository, DashboardSummary};
pub use repository::employee::{EmployeeRepository, NewEmployee};
pub use repository::order::{NewOrder, OrderRepository};
pub use repository::product::ProductRepository;
pub use repository::sale::{NewSale, SaleRepository};
