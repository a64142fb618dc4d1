//! Public surface of the chain-state store.
//!
//! `ChainStore` owns the SQLite pool and the freshness windows, validates
//! entities before they are written, and hands out owned copies on read.
//! Writes that must appear atomically (registry replace, transaction
//! merge-or-insert, bootstrap) each run inside a single SQLite transaction.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::time::Duration;

use crate::cache::{self, BlockCacheManager, CacheKey};
use crate::config::Config;
use crate::db::{account, balance, block, connection, migration, transaction};
use crate::error::StoreResult;
use crate::models::{
    AccountBalance, AccountNetwork, BlockHeader, DataSource, MigrationRecord, NetworkIdentity,
    Transaction, TransactionRecord, UpsertOutcome,
};

#[derive(Clone)]
pub struct ChainStore {
    pool: SqlitePool,
    block_cache: BlockCacheManager,
    block_recency_window: Duration,
    balance_freshness_window: Duration,
}

fn window_start(window: Duration) -> DateTime<Utc> {
    let window = chrono::Duration::from_std(window).unwrap_or_else(|_| chrono::Duration::days(365_000));
    Utc::now()
        .checked_sub_signed(window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

impl ChainStore {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            pool,
            block_cache: cache::init_cache(config),
            block_recency_window: config.block_recency_window,
            balance_freshness_window: config.balance_freshness_window,
        }
    }

    /// Connects to `config.database_url`, applies the schema and writes the
    /// bootstrap sentinel if this is a fresh database.
    pub async fn open(config: &Config) -> StoreResult<Self> {
        let pool =
            connection::establish_connection(&config.database_url, config.db_max_connections)
                .await?;
        let store = Self::new(pool, config);
        store.ensure_initialized().await?;
        Ok(store)
    }

    pub async fn open_in_memory(config: &Config) -> StoreResult<Self> {
        let pool = connection::establish_in_memory().await?;
        let store = Self::new(pool, config);
        store.ensure_initialized().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // Bootstrap ledger

    /// Idempotent; returns `true` only on the call that wrote the sentinel.
    pub async fn ensure_initialized(&self) -> StoreResult<bool> {
        migration::ensure_initialized(&self.pool, Utc::now()).await
    }

    pub async fn applied_migrations(&self) -> StoreResult<Vec<MigrationRecord>> {
        migration::list_migrations(&self.pool).await
    }

    // Account tracking registry

    pub async fn add_account(&self, entry: &AccountNetwork) -> StoreResult<()> {
        entry.validate()?;
        account::add_account(&self.pool, entry).await
    }

    /// Atomically swaps the whole registry for `entries`. Readers see either
    /// the previous set or the new one.
    pub async fn replace_accounts(&self, entries: &[AccountNetwork]) -> StoreResult<()> {
        for entry in entries {
            entry.validate()?;
        }
        account::replace_accounts(&self.pool, entries).await?;
        Ok(())
    }

    pub async fn list_accounts(&self) -> StoreResult<Vec<AccountNetwork>> {
        account::list_accounts(&self.pool).await
    }

    // Block tracker

    pub async fn add_block(&self, header: &BlockHeader) -> StoreResult<()> {
        header.validate()?;
        block::insert_block(&self.pool, header).await?;
        self.block_cache.insert(header.clone()).await;
        Ok(())
    }

    pub async fn get_block(
        &self,
        network: &NetworkIdentity,
        hash: &str,
    ) -> StoreResult<Option<BlockHeader>> {
        let key = CacheKey::block(&network.name, hash);
        if let Some(header) = self.block_cache.get(&key).await {
            return Ok(Some(header));
        }

        let header = block::get_block(&self.pool, &network.name, hash).await?;
        if let Some(header) = &header {
            self.block_cache.insert(header.clone()).await;
        }
        Ok(header)
    }

    /// Newest block for the network inside the recency window, if any.
    pub async fn get_latest_block(
        &self,
        network: &NetworkIdentity,
    ) -> StoreResult<Option<BlockHeader>> {
        let since = window_start(self.block_recency_window);
        block::get_latest_block(&self.pool, &network.name, since).await
    }

    // Transaction tracker

    pub async fn get_transaction(
        &self,
        network: &NetworkIdentity,
        hash: &str,
    ) -> StoreResult<Option<TransactionRecord>> {
        transaction::get_transaction(&self.pool, &network.name, hash).await
    }

    /// Inserts `tx` stamped with `data_source` and the current time, or, if
    /// the hash is already known on this network, overwrites only its block
    /// association. A stale block association passed here silently replaces
    /// a newer one.
    pub async fn add_or_update_transaction(
        &self,
        tx: &Transaction,
        data_source: DataSource,
    ) -> StoreResult<UpsertOutcome> {
        tx.validate()?;
        transaction::add_or_update_transaction(&self.pool, tx, data_source, Utc::now()).await
    }

    /// Inserts a transaction that must not already exist.
    pub async fn insert_transaction(
        &self,
        tx: &Transaction,
        data_source: DataSource,
    ) -> StoreResult<()> {
        tx.validate()?;
        transaction::insert_transaction(&self.pool, tx, data_source, Utc::now()).await
    }

    // Balance tracker

    pub async fn record_balance(&self, observation: &AccountBalance) -> StoreResult<i64> {
        observation.validate()?;
        balance::insert_balance(&self.pool, observation).await
    }

    /// Most recently retrieved balance inside the freshness window.
    pub async fn get_latest_balance(
        &self,
        account: &str,
        network: &NetworkIdentity,
        asset_symbol: &str,
    ) -> StoreResult<Option<AccountBalance>> {
        let since = window_start(self.balance_freshness_window);
        balance::get_latest_balance(&self.pool, account, &network.name, asset_symbol, since).await
    }
}

impl std::fmt::Debug for ChainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainStore")
            .field("block_recency_window", &self.block_recency_window)
            .field("balance_freshness_window", &self.balance_freshness_window)
            .finish_non_exhaustive()
    }
}
