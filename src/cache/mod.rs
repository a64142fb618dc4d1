mod block;
mod keys;

pub use block::BlockCacheManager;
pub use keys::CacheKey;

use crate::config::Config;

pub fn init_cache(config: &Config) -> BlockCacheManager {
    BlockCacheManager::new(config.cache_max_capacity, config.cache_ttl)
}
