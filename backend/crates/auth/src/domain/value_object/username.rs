//! Username Value Object and Policy
//!
//! A username is the player's public handle. It is also the only claim
//! carried by an access token, so the policy runs before any token is minted.
//!
//! ## Rules (checked in this order, first failure wins)
//! 1. Not empty
//! 2. At most [`USERNAME_MAX_LENGTH`] characters
//! 3. Only `A-Z`, `a-z`, `0-9`, `_` and `-`
//! 4. The streamlined form (outer `-`/`_` stripped, uppercased) must not
//!    start with a reserved sequence shorter than itself
//! 5. The streamlined form must not contain a banned term
//!
//! Uniqueness is case-insensitive: `canonical` is the lowercase form.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::banned_terms::BannedTerms;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 32;

/// Allowed non-alphanumeric characters
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '-'];

/// Prefixes kept for NPCs, staff roles and the owner
pub const DEFAULT_RESERVED_SEQUENCES: &[&str] =
    &["NPC", "SYSTEM", "ADMIN", "MOD", "CONTRIBUTOR", "OWNER"];

// ============================================================================
// Rejection Types
// ============================================================================

/// Machine-readable rejection code shown to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    #[display("CANT_BE_BLANK")]
    CantBeBlank,
    #[display("TOO_LONG")]
    TooLong,
    #[display("INVALID_CHARS")]
    InvalidChars,
    #[display("RESERVED_SEQUENCE")]
    ReservedSequence,
    #[display("CONTAINS_TERM")]
    ContainsTerm,
}

impl RejectionCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RejectionCode::CantBeBlank => "CANT_BE_BLANK",
            RejectionCode::TooLong => "TOO_LONG",
            RejectionCode::InvalidChars => "INVALID_CHARS",
            RejectionCode::ReservedSequence => "RESERVED_SEQUENCE",
            RejectionCode::ContainsTerm => "CONTAINS_TERM",
        }
    }
}

/// Why a candidate username was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameRejection {
    #[error("Username can't be blank")]
    CantBeBlank,

    #[error("Username is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Invalid character '{char}'. Only A-Z, a-z, 0-9, _ and - are allowed")]
    InvalidChars { char: char },

    #[error("Username starts with reserved sequence '{sequence}'")]
    ReservedSequence { sequence: String },

    #[error("Username contains banned term '{term}'")]
    ContainsTerm { term: String },
}

impl UsernameRejection {
    pub fn code(&self) -> RejectionCode {
        match self {
            UsernameRejection::CantBeBlank => RejectionCode::CantBeBlank,
            UsernameRejection::TooLong { .. } => RejectionCode::TooLong,
            UsernameRejection::InvalidChars { .. } => RejectionCode::InvalidChars,
            UsernameRejection::ReservedSequence { .. } => RejectionCode::ReservedSequence,
            UsernameRejection::ContainsTerm { .. } => RejectionCode::ContainsTerm,
        }
    }

    /// The offending piece of input, when there is one
    pub fn detail(&self) -> Option<String> {
        match self {
            UsernameRejection::CantBeBlank => None,
            UsernameRejection::TooLong { length, .. } => Some(length.to_string()),
            UsernameRejection::InvalidChars { char } => Some(char.to_string()),
            UsernameRejection::ReservedSequence { sequence } => Some(sequence.clone()),
            UsernameRejection::ContainsTerm { term } => Some(term.clone()),
        }
    }
}

// ============================================================================
// Policy
// ============================================================================

/// Strip leading/trailing `-` and `_`, then uppercase
///
/// ```rust
/// use auth::domain::value_object::username::streamline;
///
/// assert_eq!(streamline("__npc-bob--"), "NPC-BOB");
/// assert_eq!(streamline("_-_"), "");
/// ```
pub fn streamline(candidate: &str) -> String {
    candidate
        .trim_matches(|c| ALLOWED_SPECIAL_CHARS.contains(&c))
        .to_ascii_uppercase()
}

#[inline]
fn is_valid_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
}

/// Check a candidate against every rule
///
/// Pure: both lists are passed in. Reserved sequences are compared
/// case-insensitively and blank sequences are ignored.
pub fn validate_policy<S: AsRef<str>>(
    candidate: &str,
    reserved_sequences: &[S],
    banned_terms: &BannedTerms,
) -> Result<(), UsernameRejection> {
    if candidate.is_empty() {
        return Err(UsernameRejection::CantBeBlank);
    }

    let length = candidate.chars().count();
    if length > USERNAME_MAX_LENGTH {
        return Err(UsernameRejection::TooLong {
            length,
            max: USERNAME_MAX_LENGTH,
        });
    }

    if let Some(char) = candidate.chars().find(|&c| !is_valid_char(c)) {
        return Err(UsernameRejection::InvalidChars { char });
    }

    let streamlined = streamline(candidate);

    // An exact match of a reserved word is left alone on purpose
    for sequence in reserved_sequences {
        let sequence = sequence.as_ref().trim().to_ascii_uppercase();
        if !sequence.is_empty()
            && sequence.len() < streamlined.len()
            && streamlined.starts_with(&sequence)
        {
            return Err(UsernameRejection::ReservedSequence { sequence });
        }
    }

    if let Some(term) = banned_terms.find_in(&streamlined) {
        return Err(UsernameRejection::ContainsTerm {
            term: term.to_string(),
        });
    }

    Ok(())
}

/// Reserved sequences plus banned terms, built once at boot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernamePolicy {
    reserved_sequences: Vec<String>,
    banned_terms: BannedTerms,
}

impl UsernamePolicy {
    pub fn new<I, S>(reserved_sequences: I, banned_terms: BannedTerms) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved_sequences: reserved_sequences.into_iter().map(Into::into).collect(),
            banned_terms,
        }
    }

    /// Default reserved sequences with the given banned terms
    pub fn with_banned_terms(banned_terms: BannedTerms) -> Self {
        Self::new(DEFAULT_RESERVED_SEQUENCES.iter().copied(), banned_terms)
    }

    pub fn reserved_sequences(&self) -> &[String] {
        &self.reserved_sequences
    }

    pub fn banned_terms(&self) -> &BannedTerms {
        &self.banned_terms
    }

    #[inline]
    pub fn validate(&self, candidate: &str) -> Result<(), UsernameRejection> {
        validate_policy(candidate, &self.reserved_sequences, &self.banned_terms)
    }
}

impl Default for UsernamePolicy {
    fn default() -> Self {
        Self::with_banned_terms(BannedTerms::empty())
    }
}

// ============================================================================
// Username Value Object
// ============================================================================

/// Username accepted by a [`UsernamePolicy`]
///
/// # Storage
/// - `original`: exactly what the player typed (case preserved, signed into the token)
/// - `canonical`: lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Username {
    original: String,
    canonical: String,
}

impl Username {
    /// Validate `input` against `policy`
    pub fn parse(input: impl Into<String>, policy: &UsernamePolicy) -> Result<Self, UsernameRejection> {
        let original = input.into();
        policy.validate(&original)?;
        Ok(Self::from_db(original))
    }

    /// Rebuild from a stored record (assumes already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_ascii_lowercase();
        Self {
            original,
            canonical,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn streamlined(&self) -> String {
        streamline(&self.original)
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.original).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.original
    }
}

// ============================================================================
// Tests
// ============================================================================
