//! Validation Pair
//!
//! The `{username, token}` identity of one request. Produced by the auth
//! middleware, consumed once by the handler, never persisted.

use std::fmt;

use platform::crypto::fingerprint;

#[derive(Clone, PartialEq, Eq)]
pub struct ValidationPair {
    pub username: String,
    pub token: String,
}

impl ValidationPair {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Log-safe tag for the token
    pub fn token_fingerprint(&self) -> String {
        fingerprint(self.token.as_bytes())
    }
}

impl fmt::Debug for ValidationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationPair")
            .field("username", &self.username)
            .field("token", &self.token_fingerprint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let pair = ValidationPair::new("alice", "eyJhbGciOiJIUzI1NiJ9.raw.token");
        let debug = format!("{pair:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("eyJhbGciOiJIUzI1NiJ9"));
        assert!(debug.contains(&pair.token_fingerprint()));
    }
}
