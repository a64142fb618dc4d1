pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-export specific items for convenience
pub use error::{StoreError, StoreResult};
pub use models::{
    AccountBalance, AccountNetwork, Asset, AssetAmount, BlockHeader, DataSource, MigrationRecord,
    NetworkFamily, NetworkIdentity, Transaction, TransactionRecord, UpsertOutcome,
};
pub use store::ChainStore;
pub use validation::ValidationError;
