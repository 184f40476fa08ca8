//! In-process cache implementation.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe in-memory store mapping short key -> original URL.
///
/// Backed by a `DashMap`. Has the same overwrite semantics as Redis `SET`
/// and never fails; used as the substitute store in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>> {
        Ok(self.inner.get(short_key).map(|v| v.clone()))
    }

    async fn set_url(&self, short_key: &str, original_url: &str) -> CacheResult<()> {
        self.inner.insert(short_key.to_string(), original_url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
