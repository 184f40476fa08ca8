//! Mapping creation and resolution service.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingRepository, StorageError};
use crate::infrastructure::cache::{CacheError, CacheService};
use crate::utils::key_generator::{KeyGenerator, SHORT_KEY_LENGTH};

/// Failures of the two mapping operations.
///
/// "Key not found" is not listed here: resolution reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("original URL must not be empty")]
    Validation,

    #[error("failed to write mapping to cache: {0}")]
    CacheWrite(#[source] CacheError),

    #[error("failed to read mapping from cache: {0}")]
    CacheRead(#[source] CacheError),

    #[error("failed to store mapping durably: {0}")]
    DurableWrite(#[source] StorageError),
}

/// Reachability of both stores, as seen by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHealth {
    pub cache: bool,
    pub database: bool,
}

impl StoreHealth {
    pub fn is_healthy(&self) -> bool {
        self.cache && self.database
    }
}

/// Service for creating and resolving short key mappings.
///
/// All collaborators are injected, so tests can swap in fakes for any of them.
///
/// # Store ordering
///
/// Creation writes the cache first and the durable store second. The two
/// writes are independent: if the durable write fails the cache entry stays
/// in place and the key keeps resolving. Keys are never checked for
/// uniqueness, so a repeated key overwrites the earlier cache entry.
pub struct MappingService {
    cache: Arc<dyn CacheService>,
    repository: Arc<dyn MappingRepository>,
    key_generator: Arc<dyn KeyGenerator>,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(
        cache: Arc<dyn CacheService>,
        repository: Arc<dyn MappingRepository>,
        key_generator: Arc<dyn KeyGenerator>,
    ) -> Self {
        Self {
            cache,
            repository,
            key_generator,
        }
    }

    /// Generates a short key for `original_url` and records the mapping.
    ///
    /// # Errors
    ///
    /// - [`MappingError::Validation`] if `original_url` is empty; no store is touched
    /// - [`MappingError::CacheWrite`] if the cache write fails; the durable store is not touched
    /// - [`MappingError::DurableWrite`] if the durable write fails; the cache entry is kept
    pub async fn create_mapping(&self, original_url: &str) -> Result<String, MappingError> {
        if original_url.is_empty() {
            return Err(MappingError::Validation);
        }

        let short_key = self.key_generator.generate(SHORT_KEY_LENGTH);
        let mapping = Mapping::new(short_key, original_url);

        self.cache
            .set_url(&mapping.short_key, &mapping.original_url)
            .await
            .map_err(|e| {
                error!("Failed to generate short URL for {}: {}", original_url, e);
                MappingError::CacheWrite(e)
            })?;

        self.repository.insert(&mapping).await.map_err(|e| {
            error!(
                "Failed to store URL mapping {} -> {}: {}",
                mapping.short_key, mapping.original_url, e
            );
            MappingError::DurableWrite(e)
        })?;

        info!("Created mapping {} -> {}", mapping.short_key, mapping.original_url);

        Ok(mapping.short_key)
    }

    /// Looks up the original URL for a short key in the cache.
    ///
    /// The durable store is never consulted.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the key is known
    /// - `Ok(None)` if it is not
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::CacheRead`] if the cache could not be queried.
    pub async fn resolve_mapping(&self, short_key: &str) -> Result<Option<String>, MappingError> {
        let original_url = self.cache.get_url(short_key).await.map_err(|e| {
            error!("Failed to get original URL for {}: {}", short_key, e);
            MappingError::CacheRead(e)
        })?;

        if original_url.is_none() {
            debug!("URL not found for short key: {}", short_key);
        }

        Ok(original_url)
    }

    /// Reports whether both stores currently answer.
    pub async fn health(&self) -> StoreHealth {
        StoreHealth {
            cache: self.cache.health_check().await,
            database: self.repository.health_check().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use crate::infrastructure::cache::{MemoryCache, MockCacheService};
    use crate::utils::key_generator::{ALPHABET, MockKeyGenerator, RandomKeyGenerator};

    fn fixed_key_generator(key: &'static str) -> MockKeyGenerator {
        let mut generator = MockKeyGenerator::new();
        generator
            .expect_generate()
            .withf(|length| *length == SHORT_KEY_LENGTH)
            .returning(move |_| key.to_string());
        generator
    }

    fn accepting_repository() -> MockMappingRepository {
        let mut repository = MockMappingRepository::new();
        repository.expect_insert().returning(|_| Ok(()));
        repository
    }

    #[tokio::test]
    async fn test_create_mapping_success() {
        let mut cache = MockCacheService::new();
        cache
            .expect_set_url()
            .withf(|key, url| key == "aB3xZ9" && url == "https://example.com")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut repository = MockMappingRepository::new();
        repository
            .expect_insert()
            .withf(|mapping| *mapping == Mapping::new("aB3xZ9", "https://example.com"))
            .times(1)
            .returning(|_| Ok(()));

        let service = MappingService::new(
            Arc::new(cache),
            Arc::new(repository),
            Arc::new(fixed_key_generator("aB3xZ9")),
        );

        let result = service.create_mapping("https://example.com").await;

        assert_eq!(result.unwrap(), "aB3xZ9");
    }

    #[tokio::test]
    async fn test_create_mapping_empty_url_touches_nothing() {
        let mut cache = MockCacheService::new();
        cache.expect_set_url().times(0);

        let mut repository = MockMappingRepository::new();
        repository.expect_insert().times(0);

        let mut generator = MockKeyGenerator::new();
        generator.expect_generate().times(0);

        let service =
            MappingService::new(Arc::new(cache), Arc::new(repository), Arc::new(generator));

        let result = service.create_mapping("").await;

        assert!(matches!(result, Err(MappingError::Validation)));
    }

    #[tokio::test]
    async fn test_create_mapping_cache_failure_skips_durable_write() {
        let mut cache = MockCacheService::new();
        cache
            .expect_set_url()
            .times(1)
            .returning(|_, _| Err(CacheError::Operation("connection refused".to_string())));

        let mut repository = MockMappingRepository::new();
        repository.expect_insert().times(0);

        let service = MappingService::new(
            Arc::new(cache),
            Arc::new(repository),
            Arc::new(fixed_key_generator("abc123")),
        );

        let result = service.create_mapping("https://example.com").await;

        assert!(matches!(result, Err(MappingError::CacheWrite(_))));
    }

    #[tokio::test]
    async fn test_create_mapping_durable_failure_keeps_cache_entry() {
        let cache = MemoryCache::new();

        let mut repository = MockMappingRepository::new();
        repository
            .expect_insert()
            .times(1)
            .returning(|_| Err(StorageError::Database("disk full".to_string())));

        let service = MappingService::new(
            Arc::new(cache.clone()),
            Arc::new(repository),
            Arc::new(fixed_key_generator("keep01")),
        );

        let result = service.create_mapping("https://example.com").await;
        assert!(matches!(result, Err(MappingError::DurableWrite(_))));

        let resolved = service.resolve_mapping("keep01").await.unwrap();
        assert_eq!(resolved.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_create_mapping_returns_six_alphanumeric_chars() {
        let service = MappingService::new(
            Arc::new(MemoryCache::new()),
            Arc::new(accepting_repository()),
            Arc::new(RandomKeyGenerator::from_time()),
        );

        for _ in 0..50 {
            let key = service.create_mapping("https://example.com").await.unwrap();

            assert_eq!(key.len(), SHORT_KEY_LENGTH);
            assert!(key.bytes().all(|b| ALPHABET.contains(&b)), "{key}");
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let service = MappingService::new(
            Arc::new(MemoryCache::new()),
            Arc::new(accepting_repository()),
            Arc::new(RandomKeyGenerator::with_seed(5)),
        );

        let key = service
            .create_mapping("https://rust-lang.org/learn")
            .await
            .unwrap();
        let resolved = service.resolve_mapping(&key).await.unwrap();

        assert_eq!(resolved.as_deref(), Some("https://rust-lang.org/learn"));
    }

    #[tokio::test]
    async fn test_duplicate_key_overwrites_cache_entry() {
        let cache = MemoryCache::new();

        let mut repository = MockMappingRepository::new();
        let mut seq = mockall::Sequence::new();
        repository
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repository
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|mapping| {
                Err(StorageError::Duplicate {
                    short_key: mapping.short_key.clone(),
                })
            });

        let service = MappingService::new(
            Arc::new(cache.clone()),
            Arc::new(repository),
            Arc::new(fixed_key_generator("dupKey")),
        );

        let first = service.create_mapping("https://first.com").await;
        assert_eq!(first.unwrap(), "dupKey");

        let second = service.create_mapping("https://second.com").await;
        assert!(matches!(
            second,
            Err(MappingError::DurableWrite(StorageError::Duplicate { .. }))
        ));

        let resolved = service.resolve_mapping("dupKey").await.unwrap();
        assert_eq!(resolved.as_deref(), Some("https://second.com"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_mapping_hit() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .withf(|key| key == "aB3xZ9")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let mut repository = MockMappingRepository::new();
        repository.expect_insert().times(0);

        let service = MappingService::new(
            Arc::new(cache),
            Arc::new(repository),
            Arc::new(MockKeyGenerator::new()),
        );

        let result = service.resolve_mapping("aB3xZ9").await;

        assert_eq!(result.unwrap().as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_resolve_mapping_miss_is_not_an_error() {
        let mut cache = MockCacheService::new();
        cache.expect_get_url().times(1).returning(|_| Ok(None));

        let service = MappingService::new(
            Arc::new(cache),
            Arc::new(MockMappingRepository::new()),
            Arc::new(MockKeyGenerator::new()),
        );

        let result = service.resolve_mapping("doesNotExist").await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_resolve_mapping_cache_error() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .times(1)
            .returning(|_| Err(CacheError::Operation("broken pipe".to_string())));

        let service = MappingService::new(
            Arc::new(cache),
            Arc::new(MockMappingRepository::new()),
            Arc::new(MockKeyGenerator::new()),
        );

        let result = service.resolve_mapping("abc123").await;

        assert!(matches!(result, Err(MappingError::CacheRead(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_mapping() {
        let cache = MemoryCache::new();
        let service = Arc::new(MappingService::new(
            Arc::new(cache.clone()),
            Arc::new(accepting_repository()),
            Arc::new(RandomKeyGenerator::from_time()),
        ));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let url = format!("https://example.com/{i}");
                    let key = service.create_mapping(&url).await.unwrap();
                    (key, url)
                })
            })
            .collect();

        let mut created = Vec::with_capacity(handles.len());
        for handle in handles {
            created.push(handle.await.unwrap());
        }

        let no_collisions = cache.len() == created.len();
        for (key, url) in created {
            assert_eq!(key.len(), SHORT_KEY_LENGTH);

            // A colliding key may have been overwritten by a later request.
            let resolved = service.resolve_mapping(&key).await.unwrap();
            assert!(resolved.is_some());
            if no_collisions {
                assert_eq!(resolved.as_deref(), Some(url.as_str()));
            }
        }
    }

    #[tokio::test]
    async fn test_health_reports_each_store() {
        let mut cache = MockCacheService::new();
        cache.expect_health_check().times(1).returning(|| true);

        let mut repository = MockMappingRepository::new();
        repository.expect_health_check().times(1).returning(|| false);

        let service = MappingService::new(
            Arc::new(cache),
            Arc::new(repository),
            Arc::new(MockKeyGenerator::new()),
        );

        let health = service.health().await;

        assert!(health.cache);
        assert!(!health.database);
        assert!(!health.is_healthy());
    }
}
