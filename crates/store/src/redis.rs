//! Redis implementation of ContentCache.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use std::time::Duration;

use code_review_core::{traits::ContentCache, types::CacheKey, Error, Result};

/// Redis-backed content cache with per-entry expiry (`SET EX`).
pub struct RedisContentCache {
    client: Client,
    prefix: String,
}

impl RedisContentCache {
    /// Create a new Redis content cache.
    ///
    /// The connection is opened lazily on first use.
    pub fn new(url: &str, prefix: &str) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| Error::storage(format!("Invalid Redis URL: {}", e)))?;

        Ok(Self {
            client,
            prefix: prefix.to_string(),
        })
    }

    fn key(&self, key: &CacheKey) -> String {
        format!("{}:{}", self.prefix, key)
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::storage(format!("Redis connection error: {}", e)))
    }
}

#[async_trait]
impl ContentCache for RedisContentCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        let mut conn = self.connection().await?;

        conn.get(self.key(key))
            .await
            .map_err(|e| Error::storage(format!("Redis get error: {}", e)))
    }

    async fn put(&self, key: &CacheKey, assessment: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;

        // Redis rejects EX 0
        let seconds = ttl.as_secs().max(1);
        let _: () = conn
            .set_ex(self.key(key), assessment, seconds)
            .await
            .map_err(|e| Error::storage(format!("Redis set error: {}", e)))?;

        Ok(())
    }
}
