#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use dashmap::DashMap;
use link_stash::application::services::MappingService;
use link_stash::domain::entities::Mapping;
use link_stash::domain::repositories::{MappingRepository, StorageError};
use link_stash::infrastructure::cache::{CacheError, CacheResult, CacheService, MemoryCache};
use link_stash::routes::app_router;
use link_stash::state::AppState;
use link_stash::utils::key_generator::{KeyGenerator, RandomKeyGenerator};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Durable store fake that enforces short key uniqueness like the real table.
#[derive(Clone, Default)]
pub struct MemoryMappingRepository {
    rows: Arc<DashMap<String, String>>,
    failing: Arc<AtomicBool>,
}

impl MemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent insert fail with a database error.
    pub fn fail_inserts(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, short_key: &str) -> Option<String> {
        self.rows.get(short_key).map(|v| v.clone())
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn insert(&self, mapping: &Mapping) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Database("connection reset".to_string()));
        }

        match self.rows.entry(mapping.short_key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StorageError::Duplicate {
                short_key: mapping.short_key.clone(),
            }),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(mapping.original_url.clone());
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}

/// Cache fake whose every operation fails.
pub struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn get_url(&self, _short_key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Operation("connection refused".to_string()))
    }

    async fn set_url(&self, _short_key: &str, _original_url: &str) -> CacheResult<()> {
        Err(CacheError::Operation("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Key generator that always returns the same key.
pub struct FixedKeyGenerator(pub &'static str);

impl KeyGenerator for FixedKeyGenerator {
    fn generate(&self, _length: usize) -> String {
        self.0.to_string()
    }
}

/// Handles to the fakes behind a test server.
pub struct TestStores {
    pub cache: MemoryCache,
    pub repository: MemoryMappingRepository,
}

pub fn create_test_state_with(
    cache: Arc<dyn CacheService>,
    repository: Arc<dyn MappingRepository>,
    key_generator: Arc<dyn KeyGenerator>,
) -> AppState {
    let service = MappingService::new(cache, repository, key_generator);
    AppState::new(Arc::new(service))
}

/// State backed by in-memory stores and a real random key generator.
pub fn create_test_state() -> (AppState, TestStores) {
    let cache = MemoryCache::new();
    let repository = MemoryMappingRepository::new();

    let state = create_test_state_with(
        Arc::new(cache.clone()),
        Arc::new(repository.clone()),
        Arc::new(RandomKeyGenerator::from_time()),
    );

    (state, TestStores { cache, repository })
}

/// Serves the full application stack, middleware included, as `server::run` does.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service(app_router(state));
    TestServer::new(app).unwrap()
}
