use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NetworkIdentity;
use crate::validation::{validate_hash, ValidationError};

/// Partial block header. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub hash: String,
    pub parent_hash: String,
    pub block_height: u64,
    pub timestamp: DateTime<Utc>,
    pub network: NetworkIdentity,
}

impl BlockHeader {
    pub fn new(
        hash: impl Into<String>,
        parent_hash: impl Into<String>,
        block_height: u64,
        timestamp: DateTime<Utc>,
        network: NetworkIdentity,
    ) -> Result<Self, ValidationError> {
        let header = Self {
            hash: hash.into(),
            parent_hash: parent_hash.into(),
            block_height,
            timestamp,
            network,
        };
        header.validate()?;
        Ok(header)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.network.validate()?;
        validate_hash("hash", &self.hash)?;
        validate_hash("parent_hash", &self.parent_hash)
    }
}
