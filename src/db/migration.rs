use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use super::{from_millis, to_millis};
use crate::error::StoreResult;
use crate::models::{MigrationRecord, BOOTSTRAP_MIGRATION_ID};

#[derive(FromRow)]
struct MigrationRow {
    id: i64,
    applied_at: i64,
}

/// Writes the bootstrap sentinel if the ledger is empty. Returns whether it was written.
pub async fn ensure_initialized(pool: &SqlitePool, now: DateTime<Utc>) -> StoreResult<bool> {
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        "INSERT INTO migrations (id, applied_at)
         SELECT ?, ? WHERE NOT EXISTS (SELECT 1 FROM migrations)",
    )
    .bind(BOOTSTRAP_MIGRATION_ID)
    .bind(to_millis(now))
    .execute(&mut *tx)
    .await?
    .rows_affected()
        > 0;

    tx.commit().await?;

    if inserted {
        info!("Initialized chain state store (migration {})", BOOTSTRAP_MIGRATION_ID);
    }
    Ok(inserted)
}

pub async fn list_migrations(pool: &SqlitePool) -> StoreResult<Vec<MigrationRecord>> {
    let rows = sqlx::query_as::<_, MigrationRow>("SELECT id, applied_at FROM migrations ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok(MigrationRecord {
                id: row.id,
                applied_at: from_millis("applied_at", row.applied_at)?,
            })
        })
        .collect()
}
