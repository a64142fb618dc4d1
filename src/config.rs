use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Look-back for "latest block" queries.
pub const DEFAULT_BLOCK_RECENCY_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);
/// Look-back for "latest balance" queries.
pub const DEFAULT_BALANCE_FRESHNESS_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    pub block_recency_window: Duration,
    pub balance_freshness_window: Duration,
    pub cache_ttl: Duration,
    pub cache_max_capacity: u64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:chain_state.db".to_string());
        let db_max_connections = env_or("DB_MAX_CONNECTIONS", 5);
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env_or("SERVER_PORT", 8080);
        let block_recency_window = env::var("BLOCK_RECENCY_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_BLOCK_RECENCY_WINDOW);
        let balance_freshness_window = env::var("BALANCE_FRESHNESS_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_BALANCE_FRESHNESS_WINDOW);
        let cache_ttl = Duration::from_secs(env_or("CACHE_TTL", 3600));
        let cache_max_capacity = env_or("CACHE_MAX_CAPACITY", 10_000);

        Self {
            database_url,
            db_max_connections,
            server_host,
            server_port,
            block_recency_window,
            balance_freshness_window,
            cache_ttl,
            cache_max_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:chain_state.db".to_string(),
            db_max_connections: 5,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            block_recency_window: DEFAULT_BLOCK_RECENCY_WINDOW,
            balance_freshness_window: DEFAULT_BALANCE_FRESHNESS_WINDOW,
            cache_ttl: Duration::from_secs(3600),
            cache_max_capacity: 10_000,
        }
    }
}
