//! CLI administration tool for link-stash.
//!
//! Runs store maintenance and the two mapping operations without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create the url_mappings table
//! cargo run --bin admin -- schema init
//!
//! # Check PostgreSQL and Redis connectivity
//! cargo run --bin admin -- check
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Resolve a short key
//! cargo run --bin admin -- resolve aB3xZ9
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`link_stash::config`].

use link_stash::config::{self, Config, mask_connection_string};
use link_stash::domain::repositories::MappingRepository;
use link_stash::infrastructure::cache::CacheService;
use link_stash::infrastructure::persistence::PgMappingRepository;
use link_stash::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::process::ExitCode;
use std::sync::Arc;

/// CLI tool for managing link-stash.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database schema operations
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },

    /// Check PostgreSQL and Redis connectivity
    Check,

    /// Create a short key for a URL
    Shorten {
        /// The URL to shorten
        url: String,
    },

    /// Look up the URL behind a short key
    Resolve {
        /// The short key to resolve
        short_key: String,
    },
}

/// Schema subcommands.
#[derive(Subcommand)]
enum SchemaAction {
    /// Create the url_mappings table if it does not exist
    Init,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Schema {
            action: SchemaAction::Init,
        } => init_schema(&config).await,
        Commands::Check => check(&config).await,
        Commands::Shorten { url } => shorten(&config, &url).await,
        Commands::Resolve { short_key } => resolve(&config, &short_key).await,
    }
}

/// Creates the url_mappings table.
async fn init_schema(config: &Config) -> Result<ExitCode> {
    println!("{}", "🛠  Initializing schema...".bright_blue());

    let pool = server::connect_database(config).await?;
    let repository = PgMappingRepository::new(Arc::new(pool));

    repository
        .ensure_schema()
        .await
        .context("Failed to create url_mappings table")?;

    println!("{}", "✅ Table url_mappings is ready".green().bold());
    Ok(ExitCode::SUCCESS)
}

/// Pings both stores and reports each one separately.
async fn check(config: &Config) -> Result<ExitCode> {
    println!("{}", "🔍 Checking store connectivity...".bright_blue());
    println!();

    let database_ok = match server::connect_database(config).await {
        Ok(pool) => {
            PgMappingRepository::new(Arc::new(pool))
                .health_check()
                .await
        }
        Err(e) => {
            println!("  {}", format!("{:#}", e).red());
            false
        }
    };
    print_check("PostgreSQL", &mask_connection_string(&config.database_url), database_ok);

    let cache_ok = match server::connect_cache(config).await {
        Ok(cache) => cache.health_check().await,
        Err(e) => {
            println!("  {}", format!("{:#}", e).red());
            false
        }
    };
    print_check("Redis", &mask_connection_string(&config.redis_url), cache_ok);

    println!();
    if database_ok && cache_ok {
        println!("{}", "✅ All stores reachable".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "❌ One or more stores unreachable".red().bold());
        Ok(ExitCode::FAILURE)
    }
}

fn print_check(name: &str, target: &str, ok: bool) {
    let status = if ok { "ok".green().bold() } else { "error".red().bold() };
    println!("  {:<12} {:<6} {}", name, status, target.bright_white());
}

/// Creates a mapping through the same service the HTTP API uses.
async fn shorten(config: &Config, url: &str) -> Result<ExitCode> {
    let service = server::build_mapping_service(config).await?;

    let short_key = service
        .create_mapping(url)
        .await
        .context("Failed to shorten URL")?;

    println!("{}", "✅ Short key created".green().bold());
    println!("  Key: {}", short_key.bright_yellow().bold());
    println!("  URL: {}", url.cyan());
    Ok(ExitCode::SUCCESS)
}

/// Resolves a short key from the cache.
async fn resolve(config: &Config, short_key: &str) -> Result<ExitCode> {
    let service = server::build_mapping_service(config).await?;

    match service
        .resolve_mapping(short_key)
        .await
        .context("Failed to resolve short key")?
    {
        Some(url) => {
            println!("{} -> {}", short_key.bright_yellow(), url.cyan());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{}", format!("❌ No mapping for '{}'", short_key).red());
            Ok(ExitCode::FAILURE)
        }
    }
}
