//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use tunehub_core::config::cache::MemoryCacheConfig;
use tunehub_core::result::AppResult;
use tunehub_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
///
/// The cache is built without a time-to-live: provider tokens must never
/// expire on their own. `set` with an explicit TTL therefore behaves like
/// `set_persistent` here; single-node development and tests don't rely on
/// in-memory expiry.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, String>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.max_capacity).build();

        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> AppResult<()> {
        // moka sets TTL at cache level, not per entry in the simple API,
        // and this cache is built without one.
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn set_persistent(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
