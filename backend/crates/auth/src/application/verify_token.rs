//! Verify Token Use Case
//!
//! Turns an `Authorization: <scheme> <token>` header into a claimed
//! [`ValidationPair`]. Signature and claim shape are checked here; whether
//! the token is still live is decided against the store by
//! [`AuthenticateUseCase`](crate::application::authenticate::AuthenticateUseCase).

use axum::http::{HeaderMap, header::AUTHORIZATION};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation, decode, decode_header};
use serde_json::{Map, Value};

use crate::domain::value_object::{secret::Secret, validation_pair::ValidationPair};
use crate::error::{AuthError, AuthResult};

/// Claim carrying the username
pub const USERNAME_CLAIM: &str = "username";

/// Algorithms a token header may declare
pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Decoded claims, before shape checks
pub type RawClaims = Map<String, Value>;

/// Candidate token from the Authorization header
///
/// The header must split on `' '` into exactly two segments; the scheme
/// is not checked. Missing or non-ASCII headers yield `None`.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut segments = value.split(' ');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_scheme), Some(token), None) => Some(token),
        _ => None,
    }
}

/// Token validator bound to one secret
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &Secret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // Tokens carry no registered claims
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Check the declared algorithm, then the signature
    pub fn verify_and_decode(&self, token: &str) -> AuthResult<TokenData<RawClaims>> {
        let header = decode_header(token).map_err(|e| AuthError::MalformedToken(e.to_string()))?;

        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        decode::<RawClaims>(token, &self.key, &self.validation).map_err(|e| match e.kind() {
            JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                AuthError::InvalidSignature(e.to_string())
            }
            JwtErrorKind::Json(_) => AuthError::InvalidClaims(e.to_string()),
            _ => AuthError::MalformedToken(e.to_string()),
        })
    }

    /// Header → verified token → `{username, raw token}`
    pub fn extract_metadata(&self, headers: &HeaderMap) -> AuthResult<ValidationPair> {
        let token = extract_token(headers).ok_or(AuthError::InvalidHeader)?;
        let data = self.verify_and_decode(token)?;

        let username = data
            .claims
            .get(USERNAME_CLAIM)
            .and_then(Value::as_str)
            .ok_or_else(|| AuthError::InvalidClaims("username claim missing or not a string".into()))?;

        Ok(ValidationPair::new(username, token))
    }
}
