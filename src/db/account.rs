use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::network_from_columns;
use crate::error::StoreResult;
use crate::models::AccountNetwork;

#[derive(FromRow)]
struct AccountRow {
    account: String,
    network_family: String,
    chain_id: String,
    network_name: String,
}

impl AccountRow {
    fn into_model(self) -> StoreResult<AccountNetwork> {
        Ok(AccountNetwork {
            account: self.account,
            network: network_from_columns(&self.network_family, self.chain_id, self.network_name)?,
        })
    }
}

async fn upsert_row(conn: &mut SqliteConnection, entry: &AccountNetwork) -> StoreResult<()> {
    sqlx::query(
        "INSERT OR REPLACE INTO account_networks (account, network_family, chain_id, network_name)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&entry.account)
    .bind(entry.network.family.as_str())
    .bind(&entry.network.chain_id)
    .bind(&entry.network.name)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn add_account(pool: &SqlitePool, entry: &AccountNetwork) -> StoreResult<()> {
    let mut conn = pool.acquire().await?;
    upsert_row(&mut conn, entry).await?;
    debug!("Tracking account {} on {}", entry.account, entry.network);
    Ok(())
}

/// Clears the registry and repopulates it from `entries` inside one write transaction.
pub async fn replace_accounts(pool: &SqlitePool, entries: &[AccountNetwork]) -> StoreResult<u64> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM account_networks")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for entry in entries {
        upsert_row(&mut tx, entry).await?;
    }

    tx.commit().await?;

    info!(
        "Replaced tracked accounts: {} removed, {} written",
        removed,
        entries.len()
    );
    Ok(removed)
}

pub async fn list_accounts(pool: &SqlitePool) -> StoreResult<Vec<AccountNetwork>> {
    let rows = sqlx::query_as::<_, AccountRow>(
        "SELECT account, network_family, chain_id, network_name
         FROM account_networks
         ORDER BY network_name, account",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(AccountRow::into_model).collect()
}
