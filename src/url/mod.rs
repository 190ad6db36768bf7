//! URL handling module for Sitewalk
//!
//! This module provides the [`Address`] type used as the crawl's unit of work
//! and result key, its normalization rules, and the origin-prefix test that
//! keeps a crawl on one site.

mod normalize;
mod prefix;

use crate::UrlError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use url::Url;

// Re-export main functions
pub use normalize::normalize_address;
pub use prefix::OriginPrefix;

/// A normalized absolute resource locator
///
/// Equality, hashing and ordering are defined over the normalized textual
/// form only, so two spellings of the same resource compare equal.
///
/// # Examples
///
/// ```
/// use sitewalk::url::Address;
///
/// let a: Address = "http://x/a/#frag".parse().unwrap();
/// let b: Address = "http://x/a".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "http://x/a");
/// ```
#[derive(Clone)]
pub struct Address {
    text: String,
    url: Url,
}

impl Address {
    /// Parses and normalizes an absolute `http`/`https` locator
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        normalize_address(input)
    }

    pub(crate) fn from_parts(text: String, url: Url) -> Self {
        Self { text, url }
    }

    /// The normalized textual form
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed form, used for fetching and for resolving relative links
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.text)
    }
}

impl FromStr for Address {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equal_spellings_hash_together() {
        let mut set = HashSet::new();
        set.insert(Address::parse("http://localhost:8000/about").unwrap());
        set.insert(Address::parse("http://localhost:8000/about#team").unwrap());
        set.insert(Address::parse("http://localhost:8000/about/").unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering_is_textual() {
        let a = Address::parse("http://x/a").unwrap();
        let b = Address::parse("http://x/b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_url_keeps_root_path() {
        let root = Address::parse("http://localhost:8000/").unwrap();
        assert_eq!(root.as_str(), "http://localhost:8000");
        assert_eq!(root.url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_from_str() {
        let parsed: Result<Address, _> = "ftp://x/file".parse();
        assert!(matches!(parsed, Err(UrlError::InvalidScheme(_))));
    }
}
