mod account;
mod balance;
mod block;
mod migration;
mod network;
mod transaction;

pub use account::AccountNetwork;
pub use balance::{AccountBalance, Asset, AssetAmount};
pub use block::BlockHeader;
pub use migration::{MigrationRecord, BOOTSTRAP_MIGRATION_ID};
pub use network::{NetworkFamily, NetworkIdentity};
pub use transaction::{DataSource, Transaction, TransactionRecord, UpsertOutcome};
