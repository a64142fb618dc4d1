use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

use super::{from_millis, from_sql_int, network_from_columns, to_millis, to_sql_int};
use crate::error::{StoreError, StoreResult};
use crate::models::BlockHeader;

#[derive(FromRow)]
struct BlockRow {
    hash: String,
    network_name: String,
    network_family: String,
    chain_id: String,
    parent_hash: String,
    block_height: i64,
    block_time: i64,
}

impl BlockRow {
    fn into_model(self) -> StoreResult<BlockHeader> {
        Ok(BlockHeader {
            hash: self.hash,
            parent_hash: self.parent_hash,
            block_height: from_sql_int("block_height", self.block_height)?,
            timestamp: from_millis("block_time", self.block_time)?,
            network: network_from_columns(&self.network_family, self.chain_id, self.network_name)?,
        })
    }
}

/// Inserts a header. A second header with the same (hash, network name) is rejected.
pub async fn insert_block(pool: &SqlitePool, header: &BlockHeader) -> StoreResult<()> {
    let result = sqlx::query(
        "INSERT INTO blocks
         (hash, network_name, network_family, chain_id, parent_hash, block_height, block_time)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&header.hash)
    .bind(&header.network.name)
    .bind(header.network.family.as_str())
    .bind(&header.network.chain_id)
    .bind(&header.parent_hash)
    .bind(to_sql_int("block_height", header.block_height)?)
    .bind(to_millis(header.timestamp))
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            debug!("Stored block {} #{} on {}", header.hash, header.block_height, header.network.name);
            Ok(())
        }
        Err(err) => match StoreError::from(err) {
            StoreError::ConstraintViolation(_) => {
                warn!("Rejected duplicate block {} on {}", header.hash, header.network.name);
                Err(StoreError::ConstraintViolation(format!(
                    "block {} already stored for network {}",
                    header.hash, header.network.name
                )))
            }
            other => Err(other),
        },
    }
}

pub async fn get_block(
    pool: &SqlitePool,
    network_name: &str,
    hash: &str,
) -> StoreResult<Option<BlockHeader>> {
    let row = sqlx::query_as::<_, BlockRow>(
        "SELECT hash, network_name, network_family, chain_id, parent_hash, block_height, block_time
         FROM blocks
         WHERE hash = ? AND network_name = ?",
    )
    .bind(hash)
    .bind(network_name)
    .fetch_optional(pool)
    .await?;

    row.map(BlockRow::into_model).transpose()
}

/// Newest header for `network_name` whose timestamp is at or after `since`.
pub async fn get_latest_block(
    pool: &SqlitePool,
    network_name: &str,
    since: DateTime<Utc>,
) -> StoreResult<Option<BlockHeader>> {
    let row = sqlx::query_as::<_, BlockRow>(
        "SELECT hash, network_name, network_family, chain_id, parent_hash, block_height, block_time
         FROM blocks
         WHERE network_name = ? AND block_time >= ?
         ORDER BY block_time DESC, block_height DESC
         LIMIT 1",
    )
    .bind(network_name)
    .bind(to_millis(since))
    .fetch_optional(pool)
    .await?;

    row.map(BlockRow::into_model).transpose()
}
