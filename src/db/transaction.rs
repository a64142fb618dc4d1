use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use super::{from_millis, from_sql_int, network_from_columns, to_millis, to_sql_int};
use crate::error::{StoreError, StoreResult};
use crate::models::{DataSource, Transaction, TransactionRecord, UpsertOutcome};

#[derive(FromRow)]
struct TransactionRow {
    hash: String,
    network_name: String,
    network_family: String,
    chain_id: String,
    from_address: String,
    to_address: Option<String>,
    nonce: Option<i64>,
    block_hash: Option<String>,
    block_height: Option<i64>,
    data_source: String,
    first_seen: i64,
    extra: String,
}

impl TransactionRow {
    fn into_model(self) -> StoreResult<TransactionRecord> {
        let extra: Map<String, Value> = serde_json::from_str(&self.extra)?;
        let data_source = self
            .data_source
            .parse::<DataSource>()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        Ok(TransactionRecord {
            transaction: Transaction {
                hash: self.hash,
                from: self.from_address,
                to: self.to_address,
                nonce: self.nonce.map(|n| from_sql_int("nonce", n)).transpose()?,
                block_hash: self.block_hash,
                block_height: self
                    .block_height
                    .map(|h| from_sql_int("block_height", h))
                    .transpose()?,
                network: network_from_columns(&self.network_family, self.chain_id, self.network_name)?,
                extra,
            },
            data_source,
            first_seen: from_millis("first_seen", self.first_seen)?,
        })
    }
}

async fn insert_row(
    conn: &mut SqliteConnection,
    tx: &Transaction,
    data_source: DataSource,
    first_seen: DateTime<Utc>,
) -> StoreResult<()> {
    let nonce = tx.nonce.map(|n| to_sql_int("nonce", n)).transpose()?;
    let block_height = tx
        .block_height
        .map(|h| to_sql_int("block_height", h))
        .transpose()?;
    let extra = serde_json::to_string(&tx.extra)?;

    sqlx::query(
        r#"
        INSERT INTO transactions
        (hash, network_name, network_family, chain_id, from_address, to_address, nonce,
         block_hash, block_height, data_source, first_seen, extra)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&tx.hash)
    .bind(&tx.network.name)
    .bind(tx.network.family.as_str())
    .bind(&tx.network.chain_id)
    .bind(&tx.from)
    .bind(&tx.to)
    .bind(nonce)
    .bind(&tx.block_hash)
    .bind(block_height)
    .bind(data_source.as_str())
    .bind(to_millis(first_seen))
    .bind(extra)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn get_transaction(
    pool: &SqlitePool,
    network_name: &str,
    hash: &str,
) -> StoreResult<Option<TransactionRecord>> {
    let row = sqlx::query_as::<_, TransactionRow>(
        r#"SELECT hash, network_name, network_family, chain_id, from_address, to_address, nonce,
                  block_hash, block_height, data_source, first_seen, extra
           FROM transactions
           WHERE hash = ? AND network_name = ?"#,
    )
    .bind(hash)
    .bind(network_name)
    .fetch_optional(pool)
    .await?;

    row.map(TransactionRow::into_model).transpose()
}

/// Plain insert outside the merge path. A duplicate (hash, network name) is rejected.
pub async fn insert_transaction(
    pool: &SqlitePool,
    tx: &Transaction,
    data_source: DataSource,
    first_seen: DateTime<Utc>,
) -> StoreResult<()> {
    let mut conn = pool.acquire().await?;

    match insert_row(&mut conn, tx, data_source, first_seen).await {
        Err(StoreError::ConstraintViolation(_)) => {
            warn!("Rejected duplicate transaction {} on {}", tx.hash, tx.network.name);
            Err(StoreError::ConstraintViolation(format!(
                "transaction {} already stored for network {}",
                tx.hash, tx.network.name
            )))
        }
        other => other,
    }
}

/// Merge-on-conflict upsert.
///
/// An existing (hash, network name) row only has `block_hash` and `block_height`
/// overwritten with the caller's values; everything else, including `first_seen`
/// and `data_source`, is left as first stored. A missing row is inserted whole
/// with `first_seen = now` and the given `data_source`.
pub async fn add_or_update_transaction(
    pool: &SqlitePool,
    tx: &Transaction,
    data_source: DataSource,
    now: DateTime<Utc>,
) -> StoreResult<UpsertOutcome> {
    let block_height = tx
        .block_height
        .map(|h| to_sql_int("block_height", h))
        .transpose()?;

    let mut db_tx = pool.begin().await?;

    // UPDATE first so the write lock is held before the existence check
    let merged = sqlx::query(
        "UPDATE transactions SET block_hash = ?, block_height = ?
         WHERE hash = ? AND network_name = ?",
    )
    .bind(&tx.block_hash)
    .bind(block_height)
    .bind(&tx.hash)
    .bind(&tx.network.name)
    .execute(&mut *db_tx)
    .await?
    .rows_affected();

    let outcome = if merged > 0 {
        UpsertOutcome::Merged
    } else {
        insert_row(&mut db_tx, tx, data_source, now).await?;
        UpsertOutcome::Inserted
    };

    db_tx.commit().await?;

    debug!(
        "Transaction {} on {} {:?} (block {:?})",
        tx.hash, tx.network.name, outcome, tx.block_height
    );
    Ok(outcome)
}
