//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, warn};

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingRepository, StorageError};
use crate::utils::db_error::is_unique_violation_on_short_url;

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS url_mappings (
    id SERIAL PRIMARY KEY,
    short_url VARCHAR(255) UNIQUE NOT NULL,
    original_url TEXT NOT NULL
)
"#;

/// PostgreSQL repository for the permanent mapping record.
///
/// Uses bound parameters for every statement; queries are checked at runtime
/// so the crate builds without a live database.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to create url_mappings table: {}", e);
                StorageError::Database(e.to_string())
            })?;

        Ok(())
    }

    async fn insert(&self, mapping: &Mapping) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO url_mappings (short_url, original_url) VALUES ($1, $2)")
            .bind(&mapping.short_key)
            .bind(&mapping.original_url)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on_short_url(&e) {
                    warn!("Short key {} already recorded", mapping.short_key);
                    StorageError::Duplicate {
                        short_key: mapping.short_key.clone(),
                    }
                } else {
                    error!(
                        "Failed to insert URL mapping {} into database: {}",
                        mapping.short_key, e
                    );
                    StorageError::Database(e.to_string())
                }
            })?;

        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
