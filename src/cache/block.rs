//! Block header cache implementation using Moka

use std::time::Duration;
use moka::future::Cache;
use crate::models::BlockHeader;
use super::keys::CacheKey;
use tracing::debug;

/// Read-through cache for block headers. Headers are immutable once stored,
/// so entries never need invalidating on write.
#[derive(Clone)]
pub struct BlockCacheManager {
    cache: Cache<CacheKey, BlockHeader>,
}

impl BlockCacheManager {
    /// Create a new block cache manager
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    /// Get a cached header
    pub async fn get(&self, key: &CacheKey) -> Option<BlockHeader> {
        let result = self.cache.get(key).await;
        if result.is_some() {
            debug!("Cache hit for key: {}", key);
        } else {
            debug!("Cache miss for key: {}", key);
        }
        result
    }

    /// Store a header
    pub async fn insert(&self, header: BlockHeader) {
        let key = CacheKey::block(&header.network.name, &header.hash);
        self.cache.insert(key, header).await;
    }
}
