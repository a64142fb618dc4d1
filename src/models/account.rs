use serde::{Deserialize, Serialize};

use super::NetworkIdentity;
use crate::validation::{validate_address, ValidationError};

/// An (account, network) pair the store is watching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountNetwork {
    pub account: String,
    pub network: NetworkIdentity,
}

impl AccountNetwork {
    pub fn new(account: impl Into<String>, network: NetworkIdentity) -> Result<Self, ValidationError> {
        let entry = Self {
            account: account.into(),
            network,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.network.validate()?;
        validate_address(self.network.family, &self.account)
    }
}
