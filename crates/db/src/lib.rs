//! Persistence for the learnpath backend.
//!
//! - [`kv`] -- the [`KvStore`](kv::KvStore) trait with Postgres and in-memory backends.
//! - [`cache`] -- [`ContentCache`](cache::ContentCache), the memoization layer for model output.
//! - [`repositories`] -- typed access to the records kept in the system-of-record store.

pub mod cache;
pub mod error;
pub mod kv;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use kv::{KvStore, MemoryKvStore, PgKvStore, SharedStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
