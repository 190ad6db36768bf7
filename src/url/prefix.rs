use crate::url::Address;

/// Textual prefix that confines a crawl to one site
///
/// A link is eligible when its normalized form starts with the normalized
/// form of the seed address and the match ends on a boundary: the end of the
/// address, a path separator or the start of a query. `http://host:800` does
/// not contain `http://host:8000`, and `/docs` does not contain `/docs-old`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPrefix(String);

impl OriginPrefix {
    /// Builds the prefix from the crawl's seed
    pub fn from_seed(seed: &Address) -> Self {
        Self(seed.as_str().to_string())
    }

    /// Returns true if the address lies under this prefix
    pub fn contains(&self, address: &Address) -> bool {
        match address.as_str().strip_prefix(self.0.as_str()) {
            Some(rest) => self.is_boundary(rest),
            None => false,
        }
    }

    fn is_boundary(&self, rest: &str) -> bool {
        match rest.chars().next() {
            None | Some('/') | Some('?') => true,
            // A seed carrying a query also admits further parameters
            Some('&') => self.0.contains('?'),
            Some(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
