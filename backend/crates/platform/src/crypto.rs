//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Digits, upper and lower ASCII letters, and `-` (63 symbols)
pub const TOKEN_SAFE_ALPHABET: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-";

/// Errors from the secure random source
#[derive(Debug, Error)]
pub enum RandomError {
    /// The operating system RNG could not produce bytes
    #[error("secure random source failed: {0}")]
    Source(#[from] rand::Error),

    /// Alphabet is empty, longer than 256 symbols, or not ASCII
    #[error("alphabet must hold 1..=256 ASCII symbols (got {0})")]
    InvalidAlphabet(usize),
}

/// Generate a random string of exactly `len` symbols drawn uniformly from `alphabet`
///
/// Bytes at or above the largest multiple of `alphabet.len()` are discarded and
/// redrawn, so every symbol has the same probability.
pub fn random_string(len: usize, alphabet: &[u8]) -> Result<String, RandomError> {
    let n = alphabet.len();
    if n == 0 || n > 256 || !alphabet.is_ascii() {
        return Err(RandomError::InvalidAlphabet(n));
    }

    let limit = 256 - (256 % n);
    let mut out = String::with_capacity(len);
    let mut buf = [0u8; 64];

    while out.len() < len {
        OsRng.try_fill_bytes(&mut buf)?;
        for &b in buf.iter().filter(|&&b| (b as usize) < limit) {
            out.push(alphabet[b as usize % n] as char);
            if out.len() == len {
                break;
            }
        }
    }

    Ok(out)
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short, non-reversible tag for a credential, safe to put in logs
///
/// First 72 bits of SHA-256, base64url without padding (12 chars).
pub fn fingerprint(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(&sha256(data)[..9])
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
