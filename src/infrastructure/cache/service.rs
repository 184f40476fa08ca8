//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
///
/// A missing key is not an error: lookups report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store holding short key to URL mappings.
///
/// This is the only read path for resolution and the first write target on
/// creation. Unlike a best-effort cache, failures must reach the caller:
/// an I/O error and a missing key are different outcomes.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed store
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process map used in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL stored under a short key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the key exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend could not be queried.
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping, overwriting any previous value for the key.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the write did not reach the backend.
    async fn set_url(&self, short_key: &str, original_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
