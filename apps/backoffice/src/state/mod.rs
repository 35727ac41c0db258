//! # State Module
//!
//! Process-wide state shared by every command through
//! [`AppContext`](crate::context::AppContext).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐ │
//! │  │  Database    │  │  QueryCache  │  │ SessionState │  │ AppConfig  │ │
//! │  │  (joshub-db) │  │              │  │              │  │            │ │
//! │  │  SQLite pool │  │  RwLock<Map< │  │  RwLock<     │  │  env +     │ │
//! │  │              │  │   QueryKey,  │  │   Option<    │  │  defaults  │ │
//! │  │              │  │   Any>>      │  │   Session>>  │  │            │ │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: internal connection pool                                  │
//! │  • QueryCache / SessionState: tokio RwLock                             │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cache;
mod config;
mod session;

pub use cache::{QueryCache, QueryKey};
pub use config::{AppConfig, ConfigError};
pub use session::{Session, SessionState};
