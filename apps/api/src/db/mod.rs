//! Persistence gateway: typed sqlx queries, one module per table.

pub mod applications;
pub mod companies;
pub mod jobs;
pub mod matches;
pub mod messages;
pub mod offers;
pub mod saved;
pub mod seekers;
pub mod users;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL connection pool and applies pending migrations.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply database migrations")?;

    info!("Database migrations applied");
    Ok(pool)
}

/// True when `err` is a unique-constraint violation (duplicate insert).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
