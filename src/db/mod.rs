pub mod account;
pub mod balance;
pub mod block;
pub mod connection;
pub mod migration;
pub mod transaction;

use chrono::{DateTime, Utc};

use crate::error::{StoreError, StoreResult};
use crate::models::{NetworkFamily, NetworkIdentity};
use crate::validation::ValidationError;

pub const INIT_SCHEMA: &str = r#"
-- Bootstrap/migration ledger
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    applied_at INTEGER NOT NULL
);

-- Tracked (account, network) pairs
CREATE TABLE IF NOT EXISTS account_networks (
    account TEXT NOT NULL,
    network_family TEXT NOT NULL,
    chain_id TEXT NOT NULL,
    network_name TEXT NOT NULL,
    PRIMARY KEY (account, network_family, chain_id, network_name)
);

-- Partial block headers
CREATE TABLE IF NOT EXISTS blocks (
    hash TEXT NOT NULL,
    network_name TEXT NOT NULL,
    network_family TEXT NOT NULL,
    chain_id TEXT NOT NULL,
    parent_hash TEXT NOT NULL,
    block_height INTEGER NOT NULL,
    block_time INTEGER NOT NULL,
    PRIMARY KEY (hash, network_name)
);

-- Transactions, merged in place once they are included in a block
CREATE TABLE IF NOT EXISTS transactions (
    hash TEXT NOT NULL,
    network_name TEXT NOT NULL,
    network_family TEXT NOT NULL,
    chain_id TEXT NOT NULL,
    from_address TEXT NOT NULL,
    to_address TEXT,
    nonce INTEGER,
    block_hash TEXT,
    block_height INTEGER,
    data_source TEXT NOT NULL,
    first_seen INTEGER NOT NULL,
    extra TEXT NOT NULL DEFAULT '{}',
    PRIMARY KEY (hash, network_name)
);

-- Append-only balance history
CREATE TABLE IF NOT EXISTS balances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account TEXT NOT NULL,
    network_family TEXT NOT NULL,
    chain_id TEXT NOT NULL,
    network_name TEXT NOT NULL,
    asset_symbol TEXT NOT NULL,
    asset TEXT NOT NULL,
    amount TEXT NOT NULL,
    block_height INTEGER NOT NULL,
    retrieved_at INTEGER NOT NULL
);

-- Create indexes for the windowed "latest" queries
CREATE INDEX IF NOT EXISTS idx_blocks_network_time ON blocks(network_name, block_time);
CREATE INDEX IF NOT EXISTS idx_balances_latest ON balances(network_name, account, asset_symbol, retrieved_at);
"#;

/// Timestamps are persisted as Unix milliseconds.
pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(column: &str, millis: i64) -> StoreResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| StoreError::Corrupt(format!("{column} out of range: {millis}")))
}

pub(crate) fn to_sql_int(field: &str, value: u64) -> StoreResult<i64> {
    i64::try_from(value).map_err(|_| {
        ValidationError::InvalidParameter(format!("{field} exceeds storage range: {value}")).into()
    })
}

pub(crate) fn from_sql_int(column: &str, value: i64) -> StoreResult<u64> {
    u64::try_from(value).map_err(|_| StoreError::Corrupt(format!("{column} is negative: {value}")))
}

pub(crate) fn network_from_columns(
    family: &str,
    chain_id: String,
    name: String,
) -> StoreResult<NetworkIdentity> {
    let family = family
        .parse::<NetworkFamily>()
        .map_err(|e| StoreError::Corrupt(e.to_string()))?;

    Ok(NetworkIdentity {
        family,
        chain_id,
        name,
    })
}
