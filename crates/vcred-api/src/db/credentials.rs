//! Credential persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `credentials` table.
//! The signed envelope is stored as JSONB; registry metadata is stored in
//! dedicated columns so tag and status queries stay indexable.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use vcred_registry::{CredentialRecord, CredentialStatus};

/// Insert a freshly issued credential record.
pub async fn insert(pool: &PgPool, record: &CredentialRecord) -> Result<(), sqlx::Error> {
    let credential = serde_json::to_value(&record.credential)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    let tags: Vec<String> = record.tags.iter().cloned().collect();

    sqlx::query(
        "INSERT INTO credentials (id, sequence_id, credential, schema_id, tags,
         status, created_at, updated_at, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(record.id)
    .bind(record.sequence_id as i64)
    .bind(&credential)
    .bind(&record.schema_id)
    .bind(&tags)
    .bind(record.status.as_str())
    .bind(record.created_at)
    .bind(record.updated_at)
    .bind(&record.created_by)
    .bind(&record.updated_by)
    .execute(pool)
    .await?;

    Ok(())
}

/// Update credential status after a revocation.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: CredentialStatus,
    updated_at: DateTime<Utc>,
    updated_by: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE credentials SET status = $1, updated_at = $2, updated_by = $3 WHERE id = $4",
    )
    .bind(status.as_str())
    .bind(updated_at)
    .bind(updated_by)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all credential records in issuance order, for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<CredentialRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, sequence_id, credential, schema_id, tags, status,
         created_at, updated_at, created_by, updated_by
         FROM credentials ORDER BY sequence_id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(CredentialRow::into_record).collect()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    sequence_id: i64,
    credential: serde_json::Value,
    schema_id: String,
    tags: Vec<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: Option<String>,
    updated_by: Option<String>,
}

impl CredentialRow {
    fn into_record(self) -> Result<CredentialRecord, sqlx::Error> {
        let credential = serde_json::from_value(self.credential)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(CredentialRecord {
            id: self.id,
            sequence_id: self.sequence_id as u64,
            credential,
            schema_id: self.schema_id,
            tags: self.tags.into_iter().collect::<BTreeSet<String>>(),
            status: CredentialStatus::parse(&self.status),
            created_at: self.created_at,
            updated_at: self.updated_at,
            created_by: self.created_by,
            updated_by: self.updated_by,
        })
    }
}
