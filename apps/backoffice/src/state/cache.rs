//! # Query Cache
//!
//! Holds the most recent result of each list query so that views can be
//! re-rendered without a round trip. Writes name the keys they make stale.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Query Cache Operations                               │
//! │                                                                         │
//! │  List view opens ───► fetch(Products, loader)                          │
//! │                         ├── hit?  → cached Vec<Product>                 │
//! │                         └── miss? → loader().await → store → return    │
//! │                                                                         │
//! │  Form submits ──────► mutate([Products, Dashboard], write)             │
//! │                         ├── write Ok  → remove both keys → Ok           │
//! │                         └── write Err → keys untouched  → Err           │
//! │                                                                         │
//! │  Loader errors are never cached.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No expiry and no eviction: a key lives until something invalidates it.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

/// Identifies one cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Customers,
    Products,
    Employees,
    RecentSales,
    RecentOrders,
    Dashboard,
    /// Employee record of a signed-in auth user.
    CurrentEmployee(String),
}

type Entry = Arc<dyn Any + Send + Sync>;

/// Keyed store of the latest result per query.
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Entry>>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache").finish_non_exhaustive()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        QueryCache::default()
    }

    /// Returns the cached value for `key`, or runs `loader`, caches its
    /// success, and returns it.
    ///
    /// A cached value of a different type counts as a miss.
    pub async fn fetch<T, E, F, Fut>(&self, key: QueryKey, loader: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(&key).await {
            debug!(?key, "Query cache hit");
            return Ok(hit);
        }

        debug!(?key, "Query cache miss");
        let value = loader().await?;

        self.entries
            .write()
            .await
            .insert(key, Arc::new(value.clone()) as Entry);

        Ok(value)
    }

    /// Runs a write and, only if it succeeds, invalidates `keys`.
    pub async fn mutate<T, E, Fut>(&self, keys: &[QueryKey], write: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let output = write.await?;
        self.invalidate(keys).await;
        Ok(output)
    }

    /// Reads a cached value without loading.
    pub async fn get<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.entries.read().await.get(key).cloned()?;
        entry.downcast::<T>().ok().map(|value| (*value).clone())
    }

    pub async fn invalidate(&self, keys: &[QueryKey]) {
        let mut entries = self.entries.write().await;
        for key in keys {
            if entries.remove(key).is_some() {
                debug!(?key, "Query cache invalidated");
            }
        }
    }

    /// Drops every entry (sign-out).
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().await.contains_key(key)
    }
}
