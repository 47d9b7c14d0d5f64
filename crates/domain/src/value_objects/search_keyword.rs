//! Search keyword value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matching::{SHORT_TOKEN_MAX_LEN, normalize};

/// A single search term derived from user input
///
/// Holds the trimmed raw form alongside its normalized (lower-cased,
/// accent-stripped) form so that matching never re-normalizes the keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SearchKeyword {
    raw: String,
    normalized: String,
}

impl SearchKeyword {
    /// Create a keyword from raw user text
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let normalized = normalize(&raw).trim().to_string();
        Self { raw, normalized }
    }

    /// The keyword as typed (trimmed)
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The keyword lower-cased with diacritics removed
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whether the keyword is empty after normalization
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Whether the keyword is short enough to require a whole-word match
    #[must_use]
    pub fn is_short_token(&self) -> bool {
        !self.is_empty() && self.normalized.chars().count() <= SHORT_TOKEN_MAX_LEN
    }
}

impl From<&str> for SearchKeyword {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SearchKeyword {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<SearchKeyword> for String {
    fn from(keyword: SearchKeyword) -> Self {
        keyword.raw
    }
}

impl fmt::Display for SearchKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_both_forms() {
        let kw = SearchKeyword::new("  Bún Bò ");
        assert_eq!(kw.raw(), "Bún Bò");
        assert_eq!(kw.normalized(), "bun bo");
    }

    #[test]
    fn short_token_detection() {
        assert!(SearchKeyword::new("bò").is_short_token());
        assert!(SearchKeyword::new("a").is_short_token());
        assert!(!SearchKeyword::new("bún").is_short_token());
        assert!(!SearchKeyword::new("").is_short_token());
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(SearchKeyword::new("   ").is_empty());
        assert!(!SearchKeyword::new("pho").is_empty());
    }

    #[test]
    fn display_shows_raw() {
        assert_eq!(SearchKeyword::new("Phở").to_string(), "Phở");
    }

    #[test]
    fn serializes_as_plain_string() {
        let kw = SearchKeyword::new("Phở");
        let json = serde_json::to_string(&kw).unwrap();
        assert_eq!(json, "\"Phở\"");
        let back: SearchKeyword = serde_json::from_str(&json).unwrap();
        assert_eq!(back.normalized(), "pho");
    }
}
