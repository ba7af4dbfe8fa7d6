//! Secret File Store
//!
//! Keeps the signing secret in a `KEY=VALUE` text file under
//! [`SECRET_KEY`]. Other lines in the file are left untouched.

use std::path::{Path, PathBuf};

use platform::crypto::RandomError;
use platform::kv_file::{KeyValueFile, KeyValueFileError};
use thiserror::Error;

use crate::domain::value_object::secret::{SECRET_KEY, Secret};

/// The secret could not be produced; the service must not start
#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error(transparent)]
    File(#[from] KeyValueFileError),

    #[error(transparent)]
    Random(#[from] RandomError),
}

/// File-backed signing secret
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    file: KeyValueFile,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: KeyValueFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Generate a new secret and persist it, replacing any previous one
    ///
    /// Every token issued under the previous secret stops verifying.
    pub async fn ensure_secret(&self) -> Result<Secret, SecretStoreError> {
        let secret = Secret::generate()?;
        self.file.upsert(SECRET_KEY, secret.expose()).await?;

        tracing::info!(path = %self.path().display(), "Signing secret regenerated");
        Ok(secret)
    }

    /// The stored secret, if present and shaped like a generated one
    pub async fn load_secret(&self) -> Result<Option<Secret>, SecretStoreError> {
        let stored = self.file.get(SECRET_KEY).await?;
        let secret = stored
            .and_then(|value| Secret::new(value).ok())
            .filter(Secret::is_well_formed);
        Ok(secret)
    }

    /// Boot-time entry point
    ///
    /// With `rotate` the secret is always regenerated. Otherwise a valid
    /// stored secret is reused and only a missing or malformed one is
    /// replaced.
    pub async fn load_or_ensure(&self, rotate: bool) -> Result<Secret, SecretStoreError> {
        if !rotate {
            if let Some(secret) = self.load_secret().await? {
                tracing::info!(path = %self.path().display(), "Signing secret loaded");
                return Ok(secret);
            }
            tracing::warn!(path = %self.path().display(), "No usable signing secret on disk");
        }
        self.ensure_secret().await
    }
}
