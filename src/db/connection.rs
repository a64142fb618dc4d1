use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::db::INIT_SCHEMA;

/// Opens (creating if needed) the SQLite database at `database_url` and applies the schema.
pub async fn establish_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        // Enable WAL mode for better concurrency
        .journal_mode(if in_memory {
            SqliteJournalMode::Memory
        } else {
            SqliteJournalMode::Wal
        });

    // Every connection to ":memory:" opens a private database, so pin exactly one
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;

    // Initialize schema
    sqlx::raw_sql(INIT_SCHEMA).execute(&pool).await?;
    info!("Database ready at {}", database_url);

    Ok(pool)
}

/// A private in-memory database, used by tests and the smoke binary.
pub async fn establish_in_memory() -> Result<SqlitePool, sqlx::Error> {
    establish_connection("sqlite::memory:", 1).await
}
