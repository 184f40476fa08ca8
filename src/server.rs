//! HTTP server initialization and runtime setup.
//!
//! Connects both stores, ensures the database schema, wires the mapping
//! service and runs the Axum server until a shutdown signal arrives.

use crate::application::services::MappingService;
use crate::config::Config;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::RedisCache;
use crate::infrastructure::persistence::PgMappingRepository;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::key_generator::RandomKeyGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("Connected to database");
    Ok(pool)
}

/// Connects to Redis and verifies it answers PING.
///
/// # Errors
///
/// Returns an error if Redis is unreachable.
pub async fn connect_cache(config: &Config) -> Result<RedisCache> {
    RedisCache::connect(
        &config.redis_url,
        config.cache_key_prefix.clone(),
        config.cache_ttl_seconds,
    )
    .await
    .context("Failed to connect to Redis")
}

/// Builds the mapping service from live stores.
///
/// Connects PostgreSQL and Redis, creates the `url_mappings` table if needed
/// and seeds the key generator from the clock. Any failure here means the
/// service must not start.
///
/// # Errors
///
/// Returns an error if either store is unreachable or schema creation fails.
pub async fn build_mapping_service(config: &Config) -> Result<MappingService> {
    let pool = connect_database(config).await?;

    let repository = PgMappingRepository::new(Arc::new(pool));
    repository
        .ensure_schema()
        .await
        .context("Failed to create url_mappings table")?;
    info!("Schema ready");

    let cache = connect_cache(config).await?;

    Ok(MappingService::new(
        Arc::new(cache),
        Arc::new(repository),
        Arc::new(RandomKeyGenerator::from_time()),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and schema
/// - Redis cache
/// - Key generator
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Either store cannot be reached
/// - Schema creation fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let mapping_service = build_mapping_service(&config).await?;

    let state = AppState::new(Arc::new(mapping_service));
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
