use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{from_millis, from_sql_int, network_from_columns, to_millis, to_sql_int};
use crate::error::StoreResult;
use crate::models::{AccountBalance, Asset, AssetAmount};

#[derive(FromRow)]
struct BalanceRow {
    account: String,
    network_family: String,
    chain_id: String,
    network_name: String,
    asset: String,
    amount: String,
    block_height: i64,
    retrieved_at: i64,
}

impl BalanceRow {
    fn into_model(self) -> StoreResult<AccountBalance> {
        let asset: Asset = serde_json::from_str(&self.asset)?;

        Ok(AccountBalance {
            account: self.account,
            network: network_from_columns(&self.network_family, self.chain_id, self.network_name)?,
            asset_amount: AssetAmount {
                amount: self.amount,
                asset,
            },
            block_height: from_sql_int("block_height", self.block_height)?,
            retrieved_at: from_millis("retrieved_at", self.retrieved_at)?,
        })
    }
}

/// Appends a balance observation and returns its row id. No deduplication.
pub async fn insert_balance(pool: &SqlitePool, balance: &AccountBalance) -> StoreResult<i64> {
    let asset = serde_json::to_string(&balance.asset_amount.asset)?;

    let result = sqlx::query(
        r#"
        INSERT INTO balances
        (account, network_family, chain_id, network_name, asset_symbol, asset, amount,
         block_height, retrieved_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&balance.account)
    .bind(balance.network.family.as_str())
    .bind(&balance.network.chain_id)
    .bind(&balance.network.name)
    .bind(&balance.asset_amount.asset.symbol)
    .bind(asset)
    .bind(&balance.asset_amount.amount)
    .bind(to_sql_int("block_height", balance.block_height)?)
    .bind(to_millis(balance.retrieved_at))
    .execute(pool)
    .await?;

    debug!(
        "Recorded {} {} balance for {} on {}",
        balance.asset_amount.amount,
        balance.asset_amount.asset.symbol,
        balance.account,
        balance.network.name
    );
    Ok(result.last_insert_rowid())
}

/// Most recently retrieved balance for (account, network name, asset symbol)
/// with `retrieved_at` at or after `since`.
pub async fn get_latest_balance(
    pool: &SqlitePool,
    account: &str,
    network_name: &str,
    asset_symbol: &str,
    since: DateTime<Utc>,
) -> StoreResult<Option<AccountBalance>> {
    let row = sqlx::query_as::<_, BalanceRow>(
        r#"SELECT account, network_family, chain_id, network_name, asset, amount,
                  block_height, retrieved_at
           FROM balances
           WHERE network_name = ? AND account = ? AND asset_symbol = ? AND retrieved_at >= ?
           ORDER BY retrieved_at DESC, id DESC
           LIMIT 1"#,
    )
    .bind(network_name)
    .bind(account)
    .bind(asset_symbol)
    .bind(to_millis(since))
    .fetch_optional(pool)
    .await?;

    row.map(BalanceRow::into_model).transpose()
}
