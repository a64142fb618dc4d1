use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NetworkIdentity;
use crate::validation::{validate_address, validate_amount, validate_required, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub contract_address: Option<String>,
}

impl Asset {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            contract_address: None,
        }
    }
}

/// An amount in the asset's smallest unit, kept as a decimal string so
/// 256-bit token balances are not truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAmount {
    pub amount: String,
    pub asset: Asset,
}

/// One balance observation. Rows are append-only history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account: String,
    pub network: NetworkIdentity,
    pub asset_amount: AssetAmount,
    pub block_height: u64,
    pub retrieved_at: DateTime<Utc>,
}

impl AccountBalance {
    pub fn new(
        account: impl Into<String>,
        network: NetworkIdentity,
        asset_amount: AssetAmount,
        block_height: u64,
        retrieved_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let balance = Self {
            account: account.into(),
            network,
            asset_amount,
            block_height,
            retrieved_at,
        };
        balance.validate()?;
        Ok(balance)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.network.validate()?;
        validate_address(self.network.family, &self.account)?;
        validate_required("asset.symbol", &self.asset_amount.asset.symbol)?;
        validate_amount(&self.asset_amount.amount)
    }
}
