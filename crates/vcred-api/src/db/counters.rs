//! Sequence counter persistence operations.
//!
//! The in-memory allocator is authoritative for a running node; these
//! functions mirror its state so counters survive restarts. The upsert is
//! a single statement and never moves a counter backwards, so concurrent
//! write-throughs cannot clobber each other.

use sqlx::PgPool;

/// Record the allocator's next value for an entity type.
pub async fn record_next(
    pool: &PgPool,
    entity_type: &str,
    next_value: u64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sequence_counters (entity_type, next_value)
         VALUES ($1, $2)
         ON CONFLICT (entity_type) DO UPDATE
         SET next_value = GREATEST(sequence_counters.next_value, EXCLUDED.next_value)",
    )
    .bind(entity_type)
    .bind(next_value as i64)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all sequence counters, for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<(String, u64)>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CounterRow>(
        "SELECT entity_type, next_value FROM sequence_counters",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| (r.entity_type, r.next_value as u64))
        .collect())
}

#[derive(sqlx::FromRow)]
struct CounterRow {
    entity_type: String,
    next_value: i64,
}
