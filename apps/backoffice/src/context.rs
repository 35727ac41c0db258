//! # Application Context
//!
//! Everything a command needs, passed explicitly as `&AppContext`.
//!
//! ## Startup Sequence
//! ```text
//! AppConfig::from_env()
//!      │
//!      ▼
//! AppContext::connect(config)
//!      ├── create the data directory
//!      ├── Database::new(config.db_config())   (migrations applied)
//!      └── empty QueryCache, no session
//! ```

use std::sync::Arc;

use tracing::info;

use crate::error::ApiResult;
use crate::state::{AppConfig, ConfigError, QueryCache, SessionState};
use joshub_db::{Database, DbConfig};

/// Shared process state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub db: Database,
    pub cache: Arc<QueryCache>,
    pub session: Arc<SessionState>,
    pub config: Arc<AppConfig>,
}

impl AppContext {
    /// Wraps an open database with an empty cache and no session.
    pub fn new(db: Database, config: AppConfig) -> Self {
        AppContext {
            db,
            cache: Arc::new(QueryCache::new()),
            session: Arc::new(SessionState::new()),
            config: Arc::new(config),
        }
    }

    /// Opens the configured database file, creating its directory.
    pub async fn connect(config: AppConfig) -> ApiResult<Self> {
        if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::DataDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let db = Database::new(config.db_config()).await?;
        info!(path = %config.db_path.display(), store = %config.store_name, "Back-office connected");

        Ok(AppContext::new(db, config))
    }

    /// Context over a fresh in-memory database with default config.
    pub async fn in_memory() -> ApiResult<Self> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Ok(AppContext::new(db, AppConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_context() {
        let ctx = AppContext::in_memory().await.unwrap();
        assert!(ctx.db.health_check().await);
        assert!(ctx.session.current().await.is_none());
        assert_eq!(ctx.config.recent_limit, 5);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let ctx = AppContext::in_memory().await.unwrap();
        let other = ctx.clone();
        assert!(Arc::ptr_eq(&ctx.cache, &other.cache));
        assert!(Arc::ptr_eq(&ctx.session, &other.session));
    }
}
