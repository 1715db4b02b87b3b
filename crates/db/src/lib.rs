//! PostgreSQL persistence for the tempo timesheet engine.
//!
//! Repositories are zero-sized structs whose methods take `&PgPool` as the
//! first argument; there is no global connection anywhere. Uniqueness
//! rules (one timesheet per user per week, one entry per user/project/day)
//! are enforced by `uq_*` constraints in the schema, which the API layer
//! maps to 409 Conflict.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
