//! `KEY=VALUE` Line File
//!
//! A tiny text key/value store: one `KEY=VALUE` pair per line, UTF-8.
//! Lines that are not pairs (comments, blanks) are preserved untouched.
//! Updates rewrite the whole file.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

/// I/O failure on a key/value file
#[derive(Debug, Error)]
#[error("failed to {op} {path}: {source}")]
pub struct KeyValueFileError {
    pub op: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Handle to a `KEY=VALUE` file on disk
#[derive(Debug, Clone)]
pub struct KeyValueFile {
    path: PathBuf,
}

impl KeyValueFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file empty if it does not exist yet
    pub async fn ensure_exists(&self) -> Result<(), KeyValueFileError> {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map(|_| ())
            .map_err(|e| self.error("create", e))
    }

    pub async fn read_lines(&self) -> Result<Vec<String>, KeyValueFileError> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.error("read", e))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    pub async fn write_lines(&self, lines: &[String]) -> Result<(), KeyValueFileError> {
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&self.path, content)
            .await
            .map_err(|e| self.error("write", e))
    }

    /// Value of `key`, or `None` when the file or the key is absent
    pub async fn get(&self, key: &str) -> Result<Option<String>, KeyValueFileError> {
        match fs::try_exists(&self.path).await {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(e) => return Err(self.error("stat", e)),
        }
        let lines = self.read_lines().await?;
        Ok(find_value(&lines, key).map(str::to_string))
    }

    /// Set `key` to `value`, creating the file when needed
    pub async fn upsert(&self, key: &str, value: &str) -> Result<(), KeyValueFileError> {
        self.ensure_exists().await?;
        let mut lines = self.read_lines().await?;
        upsert_line(&mut lines, key, value);
        self.write_lines(&lines).await?;
        tracing::debug!(path = %self.path.display(), key, "Key/value file updated");
        Ok(())
    }

    fn error(&self, op: &'static str, source: io::Error) -> KeyValueFileError {
        KeyValueFileError {
            op,
            path: self.path.clone(),
            source,
        }
    }
}

/// Value of the first line starting with `KEY=`
pub fn find_value<'a>(lines: &'a [String], key: &str) -> Option<&'a str> {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
}

/// Replace the `KEY=` line, or take over the only line of an empty file, or append
pub fn upsert_line(lines: &mut Vec<String>, key: &str, value: &str) {
    let entry = format!("{key}={value}");
    let prefix = format!("{key}=");

    if let Some(line) = lines.iter_mut().find(|l| l.starts_with(&prefix)) {
        *line = entry;
    } else if lines.len() == 1 && lines[0].trim().is_empty() {
        lines[0] = entry;
    } else {
        lines.push(entry);
    }
}
