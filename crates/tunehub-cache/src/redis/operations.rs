//! Redis-backed cache provider.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use tunehub_core::error::{AppError, ErrorKind};
use tunehub_core::result::AppResult;
use tunehub_core::traits::CacheProvider;

use super::client::RedisClient;

/// Cache provider backed by Redis.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

fn map_err(e: redis::RedisError) -> AppError {
    AppError::with_source(ErrorKind::Cache, "Redis operation failed", e)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.conn_mut();
        let key = self.client.prefixed_key(key);
        let value: Option<String> = conn.get(&key).await.map_err(map_err)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.client.conn_mut();
        let key = self.client.prefixed_key(key);
        let () = conn
            .set_ex(&key, value, ttl.as_secs())
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn set_persistent(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.client.conn_mut();
        let key = self.client.prefixed_key(key);
        let () = conn.set(&key, value).await.map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.client.conn_mut();
        let key = self.client.prefixed_key(key);
        let () = conn.del(&key).await.map_err(map_err)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let key = self.client.prefixed_key(key);
        let exists: bool = conn.exists(&key).await.map_err(map_err)?;
        Ok(exists)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_err)?;
        Ok(pong == "PONG")
    }
}
