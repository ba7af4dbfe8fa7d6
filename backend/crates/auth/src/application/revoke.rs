//! Revoke Use Case
//!
//! Deletes the caller's user record. With deterministic, non-expiring
//! tokens this is the only per-user revocation: the token stays
//! well-signed but no longer matches a record.

use std::sync::Arc;

use crate::domain::repository::UserRecordRepository;
use crate::domain::value_object::validation_pair::ValidationPair;
use crate::error::{AuthError, AuthResult};

/// Revoke use case
pub struct RevokeUseCase<R>
where
    R: UserRecordRepository,
{
    repo: Arc<R>,
}

impl<R> RevokeUseCase<R>
where
    R: UserRecordRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, identity: &ValidationPair) -> AuthResult<()> {
        if !self.repo.delete_by_token(&identity.token).await? {
            return Err(AuthError::RecordNotFound);
        }

        tracing::info!(
            username = %identity.username,
            token = %identity.token_fingerprint(),
            "User record revoked"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user_record::UserRecord;
    use crate::domain::value_object::username::Username;
    use crate::infra::memory::InMemoryUserRecordRepository;

    #[tokio::test]
    async fn test_revoke_deletes_once() {
        let repo = Arc::new(InMemoryUserRecordRepository::new());
        repo.create(&UserRecord::new(Username::from_db("alice"), "tok".into()))
            .await
            .unwrap();

        let revoke = RevokeUseCase::new(repo.clone());
        let identity = ValidationPair::new("alice", "tok");
        revoke.execute(&identity).await.unwrap();

        assert!(repo.find_by_token("tok").await.unwrap().is_none());
        assert!(matches!(
            revoke.execute(&identity).await,
            Err(AuthError::RecordNotFound)
        ));
    }
}
