use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PoolError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use thiserror::Error;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Error, Debug)]
pub enum DbSetupError {
    #[error("Failed to create database pool: {0}")]
    Pool(#[from] PoolError),

    #[error("Failed to run database migrations: {0}")]
    Migrations(Box<dyn std::error::Error + Send + Sync>),
}

pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool, DbSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(10))
        .build(manager)?;
    Ok(pool)
}

/// Create the schema if needed. Runs on server startup and before seeding.
pub fn run_migrations(pool: &DbPool) -> Result<(), DbSetupError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(DbSetupError::Migrations)?;

    for version in &applied {
        tracing::info!(%version, "Applied migration");
    }

    Ok(())
}
