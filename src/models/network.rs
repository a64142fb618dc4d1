use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{validate_required, ValidationError};

/// Chain family a network belongs to. Determines the account address format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkFamily {
    Evm,
    Bitcoin,
    Solana,
}

impl NetworkFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Evm => "evm",
            Self::Bitcoin => "bitcoin",
            Self::Solana => "solana",
        }
    }
}

impl fmt::Display for NetworkFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkFamily {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "evm" => Ok(Self::Evm),
            "bitcoin" => Ok(Self::Bitcoin),
            "solana" => Ok(Self::Solana),
            _ => Err(ValidationError::UnknownNetworkFamily(s.to_string())),
        }
    }
}

/// Identifies a chain. `name` is the discriminator every index keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkIdentity {
    pub family: NetworkFamily,
    pub chain_id: String,
    pub name: String,
}

impl NetworkIdentity {
    pub fn new(
        family: NetworkFamily,
        chain_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let network = Self {
            family,
            chain_id: chain_id.into(),
            name: name.into(),
        };
        network.validate()?;
        Ok(network)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("network.chain_id", &self.chain_id)?;
        validate_required("network.name", &self.name)?;
        Ok(())
    }
}

impl fmt::Display for NetworkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.family, self.chain_id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_round_trips_through_str() {
        for family in [NetworkFamily::Evm, NetworkFamily::Bitcoin, NetworkFamily::Solana] {
            assert_eq!(family.as_str().parse::<NetworkFamily>(), Ok(family));
        }
        assert_eq!("EVM".parse::<NetworkFamily>(), Ok(NetworkFamily::Evm));
        assert!("cosmos".parse::<NetworkFamily>().is_err());
    }

    #[test]
    fn test_network_requires_name_and_chain_id() {
        assert!(NetworkIdentity::new(NetworkFamily::Evm, "1", "mainnet").is_ok());
        assert_eq!(
            NetworkIdentity::new(NetworkFamily::Evm, "1", ""),
            Err(ValidationError::MissingParameter("network.name".to_string()))
        );
        assert_eq!(
            NetworkIdentity::new(NetworkFamily::Evm, " ", "mainnet"),
            Err(ValidationError::MissingParameter("network.chain_id".to_string()))
        );
    }
}
