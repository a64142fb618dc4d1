//! Cache key generation

use std::fmt;

/// A structured cache key that can be converted to a string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Key for a block header looked up by hash
    Block { network_name: String, hash: String },
}

impl CacheKey {
    /// Create a new block header key
    pub fn block(network_name: &str, hash: &str) -> Self {
        Self::Block {
            network_name: network_name.to_string(),
            hash: hash.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block { network_name, hash } => write!(f, "block:{}:{}", network_name, hash),
        }
    }
}
