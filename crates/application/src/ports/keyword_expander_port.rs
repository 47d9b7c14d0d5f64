//! Keyword expansion port

use domain::value_objects::SearchKeyword;
#[cfg(test)]
use mockall::automock;

/// Port for turning a raw user query into search keywords
///
/// Implementations may add spelling variants or synonyms. The returned
/// order is significant: earlier keywords are tried first.
#[cfg_attr(test, automock)]
pub trait KeywordExpanderPort: Send + Sync {
    /// Expand `query` into an ordered, duplicate-free keyword list
    fn expand(&self, query: &str) -> Vec<SearchKeyword>;
}
