//! Redis cache backing server-side sessions
//!
//! Every session the booking service hands out lives in Redis as a JSON
//! blob under a TTL, so expiry is handled by Redis itself and the service
//! stays stateless across restarts.

use redis::{AsyncCommands, Client};
use tracing::info;

use crate::error::CacheError;

/// Configuration for the Redis connection
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
}

impl RedisConfig {
    /// Build a `RedisConfig` from environment variables
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    pub fn from_env() -> Self {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        RedisConfig { url }
    }
}

/// Thin wrapper around a Redis client with the operations the session
/// store needs: set with TTL, get, delete, ping.
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
}

impl RedisPool {
    /// Initialize a new Redis connection handle
    pub async fn new(config: &RedisConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.url.clone())?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisPool { client })
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, CacheError> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    /// Set a key-value pair with an optional TTL in seconds
    pub async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;

        if let Some(ttl) = ttl_seconds {
            let _: () = conn.set_ex(key, value, ttl).await?;
        } else {
            let _: () = conn.set(key, value).await?;
        }

        Ok(())
    }

    /// Get a value by key, `None` when absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.get_connection().await?;
        let removed: u64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    /// Check that Redis answers a PING
    pub async fn health_check(&self) -> Result<bool, CacheError> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a running Redis instance"]
    async fn test_redis_connection() -> Result<(), CacheError> {
        let pool = RedisPool::new(&RedisConfig::from_env()).await?;
        assert!(pool.health_check().await?);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance"]
    async fn test_set_get_delete() -> Result<(), CacheError> {
        let pool = RedisPool::new(&RedisConfig::from_env()).await?;

        let key = "cache_test_key";
        pool.set(key, "cache_test_value", Some(5)).await?;
        assert_eq!(pool.get(key).await?, Some("cache_test_value".to_string()));

        assert!(pool.delete(key).await?);
        assert_eq!(pool.get(key).await?, None);
        Ok(())
    }
}
