//! Connection pool construction and schema migrations.
//!
//! A single pool serves every request path. Connections handed out by the pool
//! are in autocommit mode: nothing here opens a transaction, so each statement
//! commits on its own. A `PooledConnection` returns itself to the pool when it
//! is dropped, whichever way the caller exits.

use anyhow::{Context, Result, anyhow};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::config::{DatabaseConfig, PoolConfig};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Build the shared pool and open `min_idle` connections up front.
///
/// Fails if the database cannot be reached within the pool's connection timeout.
pub fn create_pool(database: &DatabaseConfig, settings: &PoolConfig) -> Result<PgPool> {
    settings.validate()?;

    info!(
        "Connecting to database at {} (pool min_idle={}, max_size={})",
        database.describe(),
        settings.min_idle,
        settings.max_size
    );

    let manager = ConnectionManager::<PgConnection>::new(database.connection_string());
    let pool = Pool::builder()
        .min_idle(Some(settings.min_idle))
        .max_size(settings.max_size)
        .connection_timeout(settings.connection_timeout())
        .build(manager)
        .context("Failed to create database connection pool")?;

    info!("Database connection pool created");
    Ok(pool)
}

/// Apply every embedded migration the database has not seen yet.
///
/// Returns the versions that were applied, oldest first.
pub fn run_migrations(pool: &PgPool) -> Result<Vec<String>> {
    let mut conn = pool
        .get()
        .context("Failed to get database connection for migrations")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("Failed to run database migrations: {}", e))?;

    let versions: Vec<String> = applied.iter().map(|v| v.to_string()).collect();
    for version in &versions {
        info!("Applied migration {}", version);
    }
    if versions.is_empty() {
        info!("Database schema is up to date");
    }

    Ok(versions)
}
