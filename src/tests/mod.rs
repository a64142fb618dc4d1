//! Store tests against in-memory (and, for concurrency, file-backed) SQLite.

mod registry_tests;
mod transaction_tests;

use crate::{
    config::Config,
    models::{NetworkFamily, NetworkIdentity},
    store::ChainStore,
};

pub(crate) const ACCOUNT_A: &str = "0x52908400098527886E0F7030069857D2E4169EE7";
pub(crate) const ACCOUNT_B: &str = "0x8617E340B3D01FA5F11F306F4090FD50E238070D";
pub(crate) const SOLANA_ACCOUNT: &str = "9ii1FEiWSgDzXAbwj2oTmJXzkfCw78mnHwPQv9WQ5iTn";

pub(crate) async fn setup() -> ChainStore {
    ChainStore::open_in_memory(&Config::default())
        .await
        .expect("Failed to open in-memory store")
}

pub(crate) fn mainnet() -> NetworkIdentity {
    NetworkIdentity::new(NetworkFamily::Evm, "1", "mainnet").unwrap()
}

pub(crate) fn sepolia() -> NetworkIdentity {
    NetworkIdentity::new(NetworkFamily::Evm, "11155111", "sepolia").unwrap()
}

pub(crate) fn solana() -> NetworkIdentity {
    NetworkIdentity::new(NetworkFamily::Solana, "mainnet-beta", "solana-mainnet").unwrap()
}

pub(crate) async fn count_rows(store: &ChainStore, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(store.pool())
        .await
        .unwrap()
}
