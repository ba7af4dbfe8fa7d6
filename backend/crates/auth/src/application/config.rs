//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::path::PathBuf;

use crate::domain::value_object::username::DEFAULT_RESERVED_SEQUENCES;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// `KEY=VALUE` file holding the signing secret
    pub secret_file: PathBuf,
    /// Regenerate the secret at every boot (invalidates all issued tokens)
    pub rotate_secret_on_boot: bool,
    /// Newline-separated banned terms; `None` means no banned terms
    pub banned_terms_file: Option<PathBuf>,
    /// Username prefixes reserved for NPCs and staff
    pub reserved_sequences: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_file: PathBuf::from("secrets.env"),
            rotate_secret_on_boot: true,
            banned_terms_file: None,
            reserved_sequences: DEFAULT_RESERVED_SEQUENCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (tokens survive restarts)
    pub fn development() -> Self {
        Self {
            rotate_secret_on_boot: false,
            ..Default::default()
        }
    }
}
