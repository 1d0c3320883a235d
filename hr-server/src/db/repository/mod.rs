//! Repository Module
//!
//! One statement per function. Every function is generic over
//! [`sqlx::Executor`], so the same call works on the pool or inside a
//! transaction owned by a service (`&mut *tx`).

pub mod department;
pub mod employee;
pub mod job;

use thiserror::Error;

/// SQLITE_CONSTRAINT_TRIGGER, raised instead of SQLITE_CONSTRAINT_FOREIGNKEY
/// when a `RESTRICT` action blocks a parent delete. sqlx does not classify it.
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation()
                || db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER)
            {
                return RepoError::ForeignKey(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
