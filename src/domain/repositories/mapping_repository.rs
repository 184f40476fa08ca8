//! Repository trait for the durable mapping record.

use crate::domain::entities::Mapping;
use async_trait::async_trait;

/// Errors raised by the durable store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The short key is already recorded. This is the only place key
    /// uniqueness is ever enforced.
    #[error("short key '{short_key}' already exists")]
    Duplicate { short_key: String },

    #[error("database error: {0}")]
    Database(String),
}

/// Durable, write-only record of every mapping.
///
/// Nothing in the resolve path reads from this store; it is an audit
/// record, not a fallback for cache misses.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Creates the `url_mappings` table if it does not exist yet.
    ///
    /// Safe to call repeatedly. Startup treats a failure here as fatal.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the statement cannot be executed.
    async fn ensure_schema(&self) -> Result<(), StorageError>;

    /// Appends a mapping row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Duplicate`] if the short key already exists.
    /// Returns [`StorageError::Database`] on any other database failure.
    async fn insert(&self, mapping: &Mapping) -> Result<(), StorageError>;

    /// Checks if the database is reachable.
    async fn health_check(&self) -> bool;
}
