use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ledger id whose presence marks the schema as initialized.
pub const BOOTSTRAP_MIGRATION_ID: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    pub id: i64,
    pub applied_at: DateTime<Utc>,
}
