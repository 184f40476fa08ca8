//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

/// Redis store for short key lookups.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// Errors are logged and returned to the caller; nothing is swallowed.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: Option<u64>,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - Namespace prepended to every key; empty stores raw short keys
    /// - `ttl_seconds` - Expiry applied on write; `None` keeps entries indefinitely
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(
        redis_url: &str,
        key_prefix: impl Into<String>,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
            key_prefix: key_prefix.into(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_key: &str) -> String {
        format!("{}{}", self.key_prefix, short_key)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!("Cache HIT: {} -> {}", short_key, url);
                Ok(Some(url))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", short_key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", short_key, e);
                Err(CacheError::Operation(e.to_string()))
            }
        }
    }

    async fn set_url(&self, short_key: &str, original_url: &str) -> CacheResult<()> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();

        let result = match self.ttl_seconds {
            Some(ttl) => conn.set_ex::<_, _, ()>(&key, original_url, ttl).await,
            None => conn.set::<_, _, ()>(&key, original_url).await,
        };

        match result {
            Ok(()) => {
                debug!(
                    "Cache SET: {} -> {} (TTL: {:?})",
                    short_key, original_url, self.ttl_seconds
                );
                Ok(())
            }
            Err(e) => {
                error!("Redis SET error for {}: {}", short_key, e);
                Err(CacheError::Operation(e.to_string()))
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
