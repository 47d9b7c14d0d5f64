//! Accent- and case-insensitive keyword matching
//!
//! Venue names are free text in whatever script and spelling the mapper
//! chose, so every comparison goes through [`normalize`] first. Keywords of
//! two characters or fewer are "short tokens" and only match as whole words;
//! longer keywords match anywhere in the text.

use crate::value_objects::SearchKeyword;

/// Longest normalized keyword that still requires a whole-word match
pub const SHORT_TOKEN_MAX_LEN: usize = 2;

/// Lower-case `text` and strip diacritical marks
///
/// `"Bún Bò Huế"` becomes `"bun bo hue"`, `"Đà Nẵng"` becomes `"da nang"`.
/// The output is ASCII, so normalizing twice yields the same string.
#[must_use]
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    deunicode::deunicode(text).to_lowercase()
}

/// Check whether `text` matches any of `keywords`
///
/// Keywords that normalize to an empty string are skipped. Short tokens
/// must appear as a whole word, bounded by non-alphanumeric characters or
/// the ends of the text. Returns `false` for empty text.
#[must_use]
pub fn matches_keywords(text: &str, keywords: &[SearchKeyword]) -> bool {
    if text.is_empty() {
        return false;
    }
    let haystack = normalize(text);

    keywords.iter().any(|keyword| {
        let needle = keyword.normalized();
        if needle.is_empty() {
            return false;
        }
        if keyword.is_short_token() {
            contains_whole_word(&haystack, needle)
        } else {
            haystack.contains(needle)
        }
    })
}

/// Case-insensitive substring check used for curated tag values
///
/// Unlike [`matches_keywords`] this applies no accent folding and no
/// word-boundary rule: `cuisine` and `dish` values come from a controlled
/// vocabulary, so a plain lower-cased containment test is enough.
/// Keywords that normalize to an empty string are skipped.
#[must_use]
pub fn matches_attribute(value: &str, keywords: &[SearchKeyword]) -> bool {
    if value.is_empty() {
        return false;
    }
    let value = value.to_lowercase();

    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| value.contains(&keyword.raw().to_lowercase()))
}

fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    haystack.char_indices().any(|(start, _)| {
        if !haystack[start..].starts_with(needle) {
            return false;
        }
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        before.is_none_or(|c| !c.is_alphanumeric()) && after.is_none_or(|c| !c.is_alphanumeric())
    })
}
