//! # Database Persistence Layer
//!
//! Optional Postgres write-through behind the in-memory store. When
//! `DATABASE_URL` is set, every mutation is mirrored to Postgres and the
//! store is hydrated from it on startup; when it is absent the API runs
//! in-memory only.

pub mod counters;
pub mod credentials;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Initialize the database pool from `DATABASE_URL` and run migrations.
///
/// Returns `Ok(None)` when `DATABASE_URL` is not set. A set-but-unreachable
/// database is an error: silently dropping persistence would lose data.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::info!("DATABASE_URL not set, running in-memory only");
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new().max_connections(5).connect(&url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("database pool initialized and migrations applied");
    Ok(Some(pool))
}
