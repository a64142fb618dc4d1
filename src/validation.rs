use thiserror::Error;

use crate::models::NetworkFamily;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingParameter(String),

    #[error("Unknown network family: {0}")]
    UnknownNetworkFamily(String),

    #[error("Invalid {family} address: {address}")]
    InvalidAddress {
        family: NetworkFamily,
        address: String,
    },

    #[error("Invalid hash: {0:?}")]
    InvalidHash(String),

    #[error("Invalid amount: {0:?}. Must be a non-negative decimal integer")]
    InvalidAmount(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingParameter(field.to_string()));
    }
    Ok(())
}

/// Hashes are opaque to the store; only emptiness and embedded whitespace are rejected.
pub fn validate_hash(field: &str, hash: &str) -> Result<(), ValidationError> {
    validate_required(field, hash)?;

    if hash.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidHash(hash.to_string()));
    }

    Ok(())
}

pub fn validate_evm_address(address: &str) -> bool {
    match address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

pub fn validate_solana_address(address: &str) -> bool {
    // Solana addresses are base58-encoded 32 byte public keys
    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == 32,
        Err(_) => false,
    }
}

pub fn validate_bitcoin_address(address: &str) -> bool {
    // Covers both base58check and bech32 encodings without decoding them
    (26..=90).contains(&address.len()) && address.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Checks that `address` has the shape the given network family uses for accounts.
pub fn validate_address(family: NetworkFamily, address: &str) -> Result<(), ValidationError> {
    validate_required("account", address)?;

    let valid = match family {
        NetworkFamily::Evm => validate_evm_address(address),
        NetworkFamily::Solana => validate_solana_address(address),
        NetworkFamily::Bitcoin => validate_bitcoin_address(address),
    };

    if !valid {
        return Err(ValidationError::InvalidAddress {
            family,
            address: address.to_string(),
        });
    }

    Ok(())
}

pub fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    validate_required("amount", amount)?;

    if !amount.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidAmount(amount.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evm_addresses() {
        assert!(validate_address(NetworkFamily::Evm, "0x52908400098527886E0F7030069857D2E4169EE7").is_ok());
        assert!(validate_address(NetworkFamily::Evm, "0x1234").is_err());
        assert!(validate_address(NetworkFamily::Evm, "52908400098527886E0F7030069857D2E4169EE7").is_err());
        assert!(validate_address(NetworkFamily::Evm, "0xZZ908400098527886E0F7030069857D2E4169EE7").is_err());
    }

    #[test]
    fn test_solana_addresses() {
        assert!(validate_address(NetworkFamily::Solana, "9ii1FEiWSgDzXAbwj2oTmJXzkfCw78mnHwPQv9WQ5iTn").is_ok());
        assert!(validate_address(NetworkFamily::Solana, "not-base58-0OIl").is_err());
    }

    #[test]
    fn test_missing_account() {
        assert_eq!(
            validate_address(NetworkFamily::Bitcoin, "  "),
            Err(ValidationError::MissingParameter("account".to_string()))
        );
    }

    #[test]
    fn test_hashes() {
        assert!(validate_hash("hash", "0xA").is_ok());
        assert!(validate_hash("hash", "").is_err());
        assert_eq!(
            validate_hash("hash", "0x 1"),
            Err(ValidationError::InvalidHash("0x 1".to_string()))
        );
    }

    #[test]
    fn test_amounts() {
        assert!(validate_amount("1000000000000000000000000000000000000000").is_ok());
        assert!(validate_amount("0").is_ok());
        assert!(validate_amount("-5").is_err());
        assert!(validate_amount("1.5").is_err());
    }
}
