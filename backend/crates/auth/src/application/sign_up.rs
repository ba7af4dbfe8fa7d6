//! Sign Up Use Case
//!
//! Creates a user record and hands back its access token.

use std::sync::Arc;

use platform::crypto::fingerprint;

use crate::application::issue_token::TokenIssuer;
use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::{StoreError, UserRecordRepository};
use crate::domain::value_object::username::{Username, UsernamePolicy};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub username: String,
    pub token: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRecordRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
    policy: Arc<UsernamePolicy>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRecordRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<TokenIssuer>, policy: Arc<UsernamePolicy>) -> Self {
        Self {
            repo,
            issuer,
            policy,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let username = Username::parse(input.username, &self.policy)?;

        if self.repo.exists_by_username(&username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let token = self.issuer.generate_token(username.as_str())?;
        let record = UserRecord::new(username, token);

        // Lost a race against a concurrent sign-up with the same name
        match self.repo.create(&record).await {
            Err(StoreError::Duplicate) => return Err(AuthError::UsernameTaken),
            other => other?,
        }

        tracing::info!(
            user_id = %record.user_id,
            username = %record.username,
            token = %fingerprint(record.token.as_bytes()),
            "User signed up"
        );

        Ok(SignUpOutput {
            username: record.username.to_string(),
            token: record.token,
        })
    }
}
