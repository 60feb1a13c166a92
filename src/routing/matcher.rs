//! Path prefix matching.
//!
//! # Design Decisions
//! - Plain byte-wise string prefix: `/api` matches `/apiextra` as well as
//!   `/api/foo`. Not path-segment aware.
//! - Case-sensitive
//! - Stripping leaves the remainder exactly as it was, no `/` is re-added

/// Matches and strips a literal path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` starts with this prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// The part of `path` after the prefix, or `None` when it does not match.
    /// An exact match yields `""`.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(self.prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api");

        assert!(matcher.matches("/api/v1"));
        assert!(matcher.matches("/api"));
        assert!(!matcher.matches("/images"));
        assert!(!matcher.matches("/API/v1"));
    }

    #[test]
    fn test_match_is_not_segment_aware() {
        let matcher = PathPrefixMatcher::new("/api");
        assert!(matcher.matches("/apiextra"));
        assert_eq!(matcher.strip("/apiextra"), Some("extra"));
    }

    #[test]
    fn test_strip() {
        let matcher = PathPrefixMatcher::new("/services/php-apis");

        assert_eq!(matcher.strip("/services/php-apis/users"), Some("/users"));
        assert_eq!(matcher.strip("/services/php-apisfoo"), Some("foo"));
        assert_eq!(matcher.strip("/services/php-apis"), Some(""));
        assert_eq!(matcher.strip("/services/go-apis/users"), None);
    }
}
