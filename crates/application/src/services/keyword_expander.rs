//! Default keyword expander
//!
//! Splits a free-text query into phrases and tokens, each in its accented
//! and accent-free spelling, so that both "bún bò" and "bun bo" style
//! names and tags are reachable.

use std::collections::HashSet;

use domain::normalize;
use domain::value_objects::SearchKeyword;

use crate::ports::KeywordExpanderPort;

/// Characters that separate independent phrases in a query
const PHRASE_SEPARATORS: &[char] = &[',', ';', '|', '/'];

/// Phrase and token based keyword expansion
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenKeywordExpander;

impl TokenKeywordExpander {
    /// Create a new expander
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl KeywordExpanderPort for TokenKeywordExpander {
    fn expand(&self, query: &str) -> Vec<SearchKeyword> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        let mut push = |candidate: String| {
            let keyword = SearchKeyword::new(candidate);
            if !keyword.is_empty() && seen.insert(keyword.raw().to_string()) {
                keywords.push(keyword);
            }
        };

        for phrase in query.split(PHRASE_SEPARATORS) {
            let tokens: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
            if tokens.is_empty() {
                continue;
            }

            let phrase = tokens.join(" ");
            let folded = normalize(&phrase);
            push(phrase);
            push(folded);

            for token in tokens {
                let folded = normalize(&token);
                push(token);
                push(folded);
            }
        }

        keywords
    }
}
