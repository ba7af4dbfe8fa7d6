//! Banned Terms File
//!
//! One term per line. Blank lines and lines starting with `#` are skipped.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_object::banned_terms::BannedTerms;

#[derive(Debug, Error)]
#[error("failed to read banned terms from {path}: {source}")]
pub struct BannedTermsFileError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Parse the file content
pub fn parse_banned_terms(content: &str) -> BannedTerms {
    BannedTerms::new(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#')),
    )
}

pub async fn load_banned_terms(path: &Path) -> Result<BannedTerms, BannedTermsFileError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BannedTermsFileError {
            path: path.to_path_buf(),
            source,
        })?;

    let terms = parse_banned_terms(&content);
    tracing::info!(path = %path.display(), count = terms.len(), "Banned terms loaded");
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let terms = parse_banned_terms("# header\n\nfoo\n  Bar  \n#baz\n");
        assert_eq!(terms.iter().collect::<Vec<_>>(), vec!["FOO", "BAR"]);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banned.txt");
        std::fs::write(&path, "rude\r\nworse\n").unwrap();

        let terms = load_banned_terms(&path).await.unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms.find_in("SO_RUDE"), Some("RUDE"));
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_banned_terms(&dir.path().join("nope.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
