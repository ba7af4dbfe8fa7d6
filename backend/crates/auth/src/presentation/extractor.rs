//! Identity Extractor

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::value_object::validation_pair::ValidationPair;
use crate::error::AuthError;

/// Identity attached by [`require_auth`](super::middleware::require_auth)
///
/// Extraction removes the identity from the request, so only the first
/// extractor in a handler gets it. Using this on a route without the
/// middleware is a wiring bug and yields a 500.
#[derive(Debug, Clone)]
pub struct Authenticated(pub ValidationPair);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .remove::<ValidationPair>()
            .map(Authenticated)
            .ok_or(AuthError::IdentityMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_identity_taken_once() {
        let (mut parts, _) = Request::new(()).into_parts();
        parts
            .extensions
            .insert(ValidationPair::new("alice", "tok"));

        let Authenticated(pair) = Authenticated::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(pair.username, "alice");

        let second = Authenticated::from_request_parts(&mut parts, &()).await;
        assert!(matches!(second, Err(AuthError::IdentityMissing)));
    }
}
