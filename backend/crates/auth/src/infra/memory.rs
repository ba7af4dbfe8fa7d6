//! In-Memory Repository Implementation
//!
//! Used when no `DATABASE_URL` is configured, and by tests. Records live
//! for the lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::{StoreError, StoreResult, UserRecordRepository};
use crate::domain::value_object::username::Username;

/// User records keyed by token
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRecordRepository {
    records: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl UserRecordRepository for InMemoryUserRecordRepository {
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self.records.read().await.get(token).cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> StoreResult<bool> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .any(|r| r.username.canonical() == username.canonical()))
    }

    async fn create(&self, record: &UserRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let taken = records.contains_key(&record.token)
            || records
                .values()
                .any(|r| r.username.canonical() == record.username.canonical());
        if taken {
            return Err(StoreError::Duplicate);
        }
        records.insert(record.token.clone(), record.clone());
        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<bool> {
        Ok(self.records.write().await.remove(token).is_some())
    }
}
