//! Overpass QL query construction
//!
//! The query first collects a candidate pool of food-related elements
//! within the radius (food amenities, food shops, anything with a
//! `cuisine` tag), then keeps the candidates whose `name`, `cuisine` or
//! `dish` matches the keyword alternation case-insensitively.

use std::collections::HashSet;
use std::fmt::Write as _;

use domain::value_objects::SearchKeyword;

use crate::config::OverpassConfig;

/// `amenity` values that count as food venues
pub const FOOD_AMENITIES: &[&str] = &[
    "restaurant",
    "fast_food",
    "cafe",
    "bar",
    "pub",
    "ice_cream",
    "food_court",
    "street_vendor",
    "biergarten",
];

/// `shop` values that count as food venues
pub const FOOD_SHOPS: &[&str] = &[
    "bakery",
    "pastry",
    "beverages",
    "food",
    "convenience",
    "deli",
    "greengrocer",
    "seafood",
    "supermarket",
    "mall",
];

/// Fields the keyword alternation is matched against
const MATCH_FIELDS: &[&str] = &["name", "cuisine", "dish"];

const CANDIDATE_SET: &str = "candidates";

/// Builds Overpass QL queries for food venue discovery
#[derive(Debug, Clone)]
pub struct OverpassQueryBuilder {
    server_timeout_secs: u64,
}

impl Default for OverpassQueryBuilder {
    fn default() -> Self {
        Self::from_config(&OverpassConfig::default())
    }
}

impl OverpassQueryBuilder {
    /// Create a builder with an explicit server-side timeout
    #[must_use]
    pub const fn new(server_timeout_secs: u64) -> Self {
        Self {
            server_timeout_secs,
        }
    }

    /// Create a builder using the timeout from `config`
    #[must_use]
    pub const fn from_config(config: &OverpassConfig) -> Self {
        Self::new(config.server_timeout_secs)
    }

    /// Render the query for venues within `radius_m` meters of `(lat, lon)`
    ///
    /// Empty keywords are dropped and duplicates (compared case-insensitively)
    /// are emitted once.
    #[must_use]
    pub fn build(&self, lat: f64, lon: f64, radius_m: u32, keywords: &[SearchKeyword]) -> String {
        let around = format!("nwr(around:{radius_m},{lat},{lon})");
        let amenities = escape_pattern(&vocabulary_pattern(FOOD_AMENITIES));
        let shops = escape_pattern(&vocabulary_pattern(FOOD_SHOPS));
        let terms = keyword_alternation(keywords);

        let mut query = String::new();
        let _ = writeln!(query, "[out:json][timeout:{}];", self.server_timeout_secs);
        query.push_str("(\n");
        let _ = writeln!(query, "  {around}[\"amenity\"~\"{amenities}\"];");
        let _ = writeln!(query, "  {around}[\"shop\"~\"{shops}\"];");
        let _ = writeln!(query, "  {around}[\"cuisine\"];");
        let _ = writeln!(query, ")->.{CANDIDATE_SET};");
        query.push_str("(\n");
        for field in MATCH_FIELDS {
            let _ = writeln!(query, "  nwr.{CANDIDATE_SET}[\"{field}\"~\"{terms}\",i];");
        }
        query.push_str(");\n");
        query.push_str("out center;\n");
        query
    }
}

/// Match one whole entry of a possibly `;`-separated tag value
fn vocabulary_pattern(values: &[&str]) -> String {
    format!("(^|;)({})($|;)", values.join("|"))
}

fn keyword_alternation(keywords: &[SearchKeyword]) -> String {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(SearchKeyword::raw)
        .filter(|raw| !raw.is_empty())
        .filter(|raw| seen.insert(raw.to_lowercase()))
        .map(|raw| escape_pattern(&escape_regex(raw)))
        .collect::<Vec<_>>()
        .join("|")
}

/// Backslash-escape characters with meaning in an Overpass regular expression
fn escape_regex(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(
            c,
            '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape a value for use inside a double-quoted Overpass QL string
#[must_use]
pub fn escape_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(raw: &[&str]) -> Vec<SearchKeyword> {
        raw.iter().copied().map(SearchKeyword::new).collect()
    }

    fn build(raw: &[&str]) -> String {
        OverpassQueryBuilder::new(60).build(21.0285, 105.8542, 1000, &keywords(raw))
    }

    #[test]
    fn test_header_and_output() {
        let query = build(&["pho"]);
        assert!(query.starts_with("[out:json][timeout:60];"));
        assert!(query.trim_end().ends_with("out center;"));
    }

    #[test]
    fn test_numeric_literals_interpolated() {
        let query = build(&["pho"]);
        assert!(query.contains("nwr(around:1000,21.0285,105.8542)"));
    }

    #[test]
    fn test_candidate_pool_clauses() {
        let query = build(&["pho"]);
        assert!(query.contains("[\"amenity\"~\"(^|;)(restaurant|fast_food|cafe|"));
        assert!(query.contains("[\"shop\"~\"(^|;)(bakery|pastry|"));
        assert!(query.contains("nwr(around:1000,21.0285,105.8542)[\"cuisine\"];"));
        assert!(query.contains(")->.candidates;"));
    }

    /// Pull the regex of the `[key~"..."]` filter out of a built query
    fn vocabulary_regex(query: &str, key: &str) -> regex::Regex {
        let marker = format!("[\"{key}\"~\"");
        let start = query.find(&marker).unwrap() + marker.len();
        let end = start + query[start..].find('"').unwrap();
        regex::Regex::new(&query[start..end]).unwrap()
    }

    #[test]
    fn test_vocabulary_accepts_multi_valued_tags() {
        let query = build(&["pho"]);
        let amenity = vocabulary_regex(&query, "amenity");
        let shop = vocabulary_regex(&query, "shop");

        assert!(amenity.is_match("restaurant"));
        assert!(amenity.is_match("cafe;restaurant"));
        assert!(amenity.is_match("parking;fast_food"));
        assert!(shop.is_match("convenience;bakery"));
    }

    #[test]
    fn test_vocabulary_rejects_partial_values() {
        let query = build(&["pho"]);
        let amenity = vocabulary_regex(&query, "amenity");
        let shop = vocabulary_regex(&query, "shop");

        assert!(!amenity.is_match("parking"));
        assert!(!amenity.is_match("barber"));
        assert!(!amenity.is_match("restaurant_supply"));
        assert!(!shop.is_match("seafood_equipment;hardware"));
    }

    #[test]
    fn test_keyword_filters_on_all_fields() {
        let query = build(&["phở", "pho"]);
        assert!(query.contains("nwr.candidates[\"name\"~\"phở|pho\",i];"));
        assert!(query.contains("nwr.candidates[\"cuisine\"~\"phở|pho\",i];"));
        assert!(query.contains("nwr.candidates[\"dish\"~\"phở|pho\",i];"));
    }

    #[test]
    fn test_duplicate_and_empty_keywords_dropped() {
        let query = build(&["Pho", "", "pho", "bun"]);
        assert!(query.contains("[\"name\"~\"Pho|bun\",i]"));
    }

    #[test]
    fn test_regex_metacharacters_escaped() {
        let query = build(&["a.b", "c|d", "(x)"]);
        // regex escape, then QL string escape doubles the backslash
        assert!(query.contains(r#""name"~"a\\.b|c\\|d|\\(x\\)",i"#));
    }

    #[test]
    fn test_quotes_escaped() {
        let query = build(&["say \"hi\""]);
        assert!(query.contains(r#""name"~"say \"hi\"",i"#));
    }

    #[test]
    fn test_escape_pattern() {
        assert_eq!(escape_pattern(r"a\b"), r"a\\b");
        assert_eq!(escape_pattern("\"q\""), "\\\"q\\\"");
        assert_eq!(escape_pattern("plain"), "plain");
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("a.b"), r"a\.b");
        assert_eq!(escape_regex("bún bò"), "bún bò");
        assert_eq!(escape_regex("x+y*"), r"x\+y\*");
    }

    #[test]
    fn test_server_timeout_from_config() {
        let config = OverpassConfig {
            server_timeout_secs: 25,
            ..OverpassConfig::default()
        };
        let query = OverpassQueryBuilder::from_config(&config).build(0.0, 0.0, 500, &keywords(&["x"]));
        assert!(query.starts_with("[out:json][timeout:25];"));
    }
}
