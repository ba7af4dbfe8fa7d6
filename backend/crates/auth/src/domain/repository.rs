//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use thiserror::Error;

use crate::domain::entity::user_record::UserRecord;
use crate::domain::value_object::username::Username;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of the user-record store itself (not "no such record")
#[derive(Debug, Error)]
pub enum StoreError {
    /// Username or token already stored
    #[error("record already exists")]
    Duplicate,

    /// Store not reachable (pool exhausted, connection dropped)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

/// User record repository trait
#[trait_variant::make(UserRecordRepository: Send)]
pub trait LocalUserRecordRepository {
    /// Find the record owning `token`
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<UserRecord>>;

    /// Check if a username is taken (case-insensitive)
    async fn exists_by_username(&self, username: &Username) -> StoreResult<bool>;

    /// Create a new record; [`StoreError::Duplicate`] when username or token is taken
    async fn create(&self, record: &UserRecord) -> StoreResult<()>;

    /// Delete the record owning `token`, returning whether one existed
    async fn delete_by_token(&self, token: &str) -> StoreResult<bool>;
}
