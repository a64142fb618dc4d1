use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::NetworkIdentity;
use crate::validation::{validate_hash, validate_required, ValidationError};

/// Where a transaction was first observed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fetched from a remote node or indexer
    Remote,
    /// Synthesized locally, e.g. a transaction this process just submitted
    Local,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            _ => Err(ValidationError::InvalidParameter(format!(
                "data source must be 'remote' or 'local', got {s:?}"
            ))),
        }
    }
}

/// A transaction as observed on chain. `block_hash`/`block_height` stay empty
/// while the transaction is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub block_height: Option<u64>,
    pub network: NetworkIdentity,
    /// Chain-specific fields the store carries but never indexes.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    pub fn new(
        hash: impl Into<String>,
        from: impl Into<String>,
        network: NetworkIdentity,
    ) -> Result<Self, ValidationError> {
        let tx = Self {
            hash: hash.into(),
            from: from.into(),
            to: None,
            nonce: None,
            block_hash: None,
            block_height: None,
            network,
            extra: Map::new(),
        };
        tx.validate()?;
        Ok(tx)
    }

    pub fn with_block(mut self, block_hash: impl Into<String>, block_height: u64) -> Self {
        self.block_hash = Some(block_hash.into());
        self.block_height = Some(block_height);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.network.validate()?;
        validate_hash("hash", &self.hash)?;
        validate_required("from", &self.from)?;
        if let Some(block_hash) = &self.block_hash {
            validate_hash("block_hash", block_hash)?;
        }
        Ok(())
    }
}

/// A stored transaction together with the provenance stamped at first insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub data_source: DataSource,
    pub first_seen: DateTime<Utc>,
}

/// Which branch of the merge-on-conflict upsert ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Inserted,
    Merged,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NetworkFamily;

    fn mainnet() -> NetworkIdentity {
        NetworkIdentity::new(NetworkFamily::Evm, "1", "mainnet").unwrap()
    }

    #[test]
    fn test_new_transaction_is_pending() {
        let tx = Transaction::new("0xA", "0xfrom", mainnet()).unwrap();
        assert!(tx.block_hash.is_none());
        assert!(tx.block_height.is_none());

        let confirmed = tx.with_block("0xB", 100);
        assert_eq!(confirmed.block_hash.as_deref(), Some("0xB"));
        assert_eq!(confirmed.block_height, Some(100));
    }

    #[test]
    fn test_transaction_requires_hash_and_sender() {
        assert!(Transaction::new("", "0xfrom", mainnet()).is_err());
        assert!(Transaction::new("0xA", "", mainnet()).is_err());
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = TransactionRecord {
            transaction: Transaction::new("0xA", "0xfrom", mainnet()).unwrap(),
            data_source: DataSource::Local,
            first_seen: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["hash"], "0xA");
        assert_eq!(value["data_source"], "local");
        assert_eq!(value["network"]["name"], "mainnet");
    }
}
