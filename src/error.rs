use thiserror::Error;

use crate::validation::ValidationError;

/// Failures surfaced by the chain-state store. A lookup miss is not an error;
/// queries return `Ok(None)` for that.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::ConstraintViolation(db_err.message().to_string());
            }
        }
        Self::Storage(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
