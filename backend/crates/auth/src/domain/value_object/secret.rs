//! Signing Secret Value Object
//!
//! The single HMAC key shared by token issuance and validation.
//! Built once at boot and handed to [`TokenIssuer`](crate::application::issue_token::TokenIssuer)
//! and [`TokenValidator`](crate::application::verify_token::TokenValidator) explicitly.
//!
//! ## Invariants
//! - Never empty (an empty key would verify forged tokens)
//! - Generated secrets are exactly [`SECRET_LENGTH`] symbols of
//!   [`TOKEN_SAFE_ALPHABET`]
//! - Key material is wiped from memory on drop and never printed

use std::fmt;

use platform::crypto::{RandomError, TOKEN_SAFE_ALPHABET, random_string};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Length of a generated secret (in characters)
pub const SECRET_LENGTH: usize = 64;

/// Key of the secret line in the secret file (`JWT_SECRET=...`)
pub const SECRET_KEY: &str = "JWT_SECRET";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("signing secret cannot be empty")]
    Empty,
}

// ============================================================================
// Secret Value Object
// ============================================================================

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    value: String,
}

impl Secret {
    /// Generate a fresh secret from the OS random source
    pub fn generate() -> Result<Self, RandomError> {
        let value = random_string(SECRET_LENGTH, TOKEN_SAFE_ALPHABET)?;
        Ok(Self { value })
    }

    /// Wrap an existing key
    ///
    /// Any non-empty value is accepted so that tests can use short,
    /// readable keys.
    pub fn new(value: impl Into<String>) -> Result<Self, SecretError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self { value })
    }

    /// True when the value has the exact shape of a generated secret
    pub fn is_well_formed(&self) -> bool {
        self.value.len() == SECRET_LENGTH
            && self.value.bytes().all(|b| TOKEN_SAFE_ALPHABET.contains(&b))
    }

    /// Raw key, for writing to the secret file
    #[inline]
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Key bytes handed to the HMAC
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        platform::crypto::constant_time_eq(self.as_bytes(), other.as_bytes())
    }
}

impl Eq for Secret {}
