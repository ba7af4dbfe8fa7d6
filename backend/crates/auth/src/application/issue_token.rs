//! Issue Token Use Case
//!
//! Mints the access token of a new account.
//!
//! The token is a compact HS256 JWT whose only claim is `username`. No
//! `iat`, `exp` or nonce is included, so issuance is deterministic: the
//! same username under the same secret always yields the same string, and
//! the token doubles as the user-record lookup key.

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

use crate::domain::value_object::secret::Secret;
use crate::error::{AuthError, AuthResult};

/// The single claim of an access token
#[derive(Debug, Serialize)]
pub struct UsernameClaims<'a> {
    pub username: &'a str,
}

/// Token issuer bound to one secret
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    header: Header,
}

impl TokenIssuer {
    pub fn new(secret: &Secret) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
        }
    }

    /// Sign `{"username": username}`
    pub fn generate_token(&self, username: &str) -> AuthResult<String> {
        encode(&self.header, &UsernameClaims { username }, &self.key)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))
    }
}
