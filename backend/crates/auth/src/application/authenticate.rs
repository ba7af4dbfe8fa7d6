//! Authenticate Use Case
//!
//! Signature check followed by a store cross-check. A well-signed token
//! only authenticates while a user record with that exact token exists.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::crypto::constant_time_eq;

use crate::application::verify_token::TokenValidator;
use crate::domain::repository::UserRecordRepository;
use crate::domain::value_object::validation_pair::ValidationPair;
use crate::error::{AuthError, AuthResult};

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: UserRecordRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    validator: Arc<TokenValidator>,
}

impl<R> Clone for AuthenticateUseCase<R>
where
    R: UserRecordRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRecordRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, validator: Arc<TokenValidator>) -> Self {
        Self { repo, validator }
    }

    /// Full check of one request's headers
    ///
    /// The store is only consulted once the token has verified.
    pub async fn execute(&self, headers: &HeaderMap) -> AuthResult<ValidationPair> {
        let claimed = self.validator.extract_metadata(headers)?;
        self.authenticate_with_store(&claimed).await
    }

    /// Cross-check a verified pair against the user-record store
    ///
    /// Returns the identity as stored, not as claimed.
    pub async fn authenticate_with_store(&self, pair: &ValidationPair) -> AuthResult<ValidationPair> {
        let record = self
            .repo
            .find_by_token(&pair.token)
            .await
            .map_err(AuthError::StoreLookup)?
            .ok_or(AuthError::RecordNotFound)?;

        if !constant_time_eq(record.token.as_bytes(), pair.token.as_bytes()) {
            return Err(AuthError::RecordNotFound);
        }

        Ok(record.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::issue_token::TokenIssuer;
    use crate::domain::entity::user_record::UserRecord;
    use crate::domain::repository::{StoreError, StoreResult};
    use crate::domain::value_object::{secret::Secret, username::Username};
    use crate::error::AuthFailureKind;
    use crate::infra::memory::InMemoryUserRecordRepository;
    use axum::http::{HeaderValue, header::AUTHORIZATION};

    struct Fixture {
        issuer: TokenIssuer,
        repo: Arc<InMemoryUserRecordRepository>,
        use_case: AuthenticateUseCase<InMemoryUserRecordRepository>,
    }

    fn fixture() -> Fixture {
        let secret = Secret::new("S1").unwrap();
        let repo = Arc::new(InMemoryUserRecordRepository::new());
        let use_case =
            AuthenticateUseCase::new(repo.clone(), Arc::new(TokenValidator::new(&secret)));
        Fixture {
            issuer: TokenIssuer::new(&secret),
            repo,
            use_case,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_live_record_authenticates() {
        let f = fixture();
        let token = f.issuer.generate_token("alice").unwrap();
        f.repo
            .create(&UserRecord::new(Username::from_db("alice"), token.clone()))
            .await
            .unwrap();

        let identity = f.use_case.execute(&bearer(&token)).await.unwrap();
        assert_eq!(identity, ValidationPair::new("alice", token));
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let f = fixture();
        let token = f.issuer.generate_token("alice").unwrap();
        let err = f.use_case.execute(&bearer(&token)).await.unwrap_err();
        assert_eq!(err.failure_kind(), Some(AuthFailureKind::NotFound));
    }

    struct DownRepository;

    impl UserRecordRepository for DownRepository {
        async fn find_by_token(&self, _token: &str) -> StoreResult<Option<UserRecord>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn exists_by_username(&self, _username: &Username) -> StoreResult<bool> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn create(&self, _record: &UserRecord) -> StoreResult<()> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn delete_by_token(&self, _token: &str) -> StoreResult<bool> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_auth_failure() {
        let secret = Secret::new("S1").unwrap();
        let use_case = AuthenticateUseCase::new(
            Arc::new(DownRepository),
            Arc::new(TokenValidator::new(&secret)),
        );
        let token = TokenIssuer::new(&secret).generate_token("alice").unwrap();

        let err = use_case.execute(&bearer(&token)).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::StoreLookup(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_identity_comes_from_store() {
        let f = fixture();
        let token = f.issuer.generate_token("alice").unwrap();
        f.repo
            .create(&UserRecord::new(Username::from_db("alice"), token.clone()))
            .await
            .unwrap();

        let claimed = ValidationPair::new("someone-else", token.clone());
        let identity = f.use_case.authenticate_with_store(&claimed).await.unwrap();
        assert_eq!(identity.username, "alice");
    }
}
