//! Banned Term List
//!
//! Substrings forbidden anywhere in a streamlined username.
//! Maintained outside the service and injected at boot.

/// Case-normalized banned terms
///
/// Terms are trimmed and uppercased on construction; blank entries and
/// duplicates are dropped, so an empty term can never match every name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannedTerms(Vec<String>);

impl BannedTerms {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_uppercase();
            if !term.is_empty() && !normalized.contains(&term) {
                normalized.push(term);
            }
        }
        Self(normalized)
    }

    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// First term contained in `streamlined` (already uppercase)
    pub fn find_in(&self, streamlined: &str) -> Option<&str> {
        self.iter().find(|term| streamlined.contains(term))
    }
}
