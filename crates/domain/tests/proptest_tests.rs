//! Property-based tests for domain value objects and matching rules
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{GeoLocation, SearchKeyword, TravelMode};
use domain::{matches_keywords, normalize};
use proptest::prelude::*;

// ============================================================================
// Normalization Property Tests
// ============================================================================

mod normalize_tests {
    use super::*;

    proptest! {
        #[test]
        fn normalize_is_idempotent(text in "\\PC{0,40}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_has_no_uppercase(text in "\\PC{0,40}") {
            let normalized = normalize(&text);
            prop_assert!(!normalized.chars().any(char::is_uppercase));
        }

        #[test]
        fn normalize_output_is_ascii(text in "[a-zA-Zàáảãạăắằẳẵặâấầẩẫậđèéẻẽẹêếềểễệìíỉĩịòóỏõọôốồổỗộơớờởỡợùúủũụưứừửữựỳýỷỹỵ ]{0,30}") {
            prop_assert!(normalize(&text).is_ascii());
        }
    }
}

// ============================================================================
// Keyword Matching Property Tests
// ============================================================================

mod matching_tests {
    use super::*;

    proptest! {
        #[test]
        fn empty_text_never_matches(raw in prop::collection::vec("\\PC{0,10}", 0..5)) {
            let keywords: Vec<SearchKeyword> = raw.iter().map(|s| SearchKeyword::new(s.as_str())).collect();
            prop_assert!(!matches_keywords("", &keywords));
        }

        #[test]
        fn no_keywords_never_match(text in "\\PC{0,40}") {
            prop_assert!(!matches_keywords(&text, &[]));
        }

        #[test]
        fn long_keyword_matches_text_containing_it(
            prefix in "[a-z]{0,8}",
            word in "[a-z]{3,8}",
            suffix in "[a-z]{0,8}"
        ) {
            let text = format!("{prefix}{word}{suffix}");
            prop_assert!(matches_keywords(&text, &[SearchKeyword::new(word.as_str())]));
        }

        #[test]
        fn short_keyword_matches_standalone_word(
            left in "[a-z]{1,8}",
            word in "[a-z]{1,2}",
            right in "[a-z]{1,8}"
        ) {
            let text = format!("{left} {word} {right}");
            prop_assert!(matches_keywords(&text, &[SearchKeyword::new(word.as_str())]));
        }

        #[test]
        fn short_keyword_never_matches_inside_single_word(
            left in "[a-z]{1,8}",
            word in "[a-z]{1,2}",
            right in "[a-z]{1,8}"
        ) {
            // one unbroken alphanumeric run has no interior boundaries
            let text = format!("{left}{word}{right}");
            prop_assert!(!matches_keywords(&text, &[SearchKeyword::new(word.as_str())]));
        }
    }
}

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let a = GeoLocation::new(lat1, lon1).unwrap();
            let b = GeoLocation::new(lat2, lon2).unwrap();
            prop_assert!((a.distance_m(&b) - b.distance_m(&a)).abs() < 0.01);
        }

        #[test]
        fn travel_time_grows_with_distance(d in 0.0f64..50_000.0f64, extra in 1.0f64..10_000.0f64) {
            let mode = TravelMode::Walking;
            prop_assert!(mode.estimate_minutes(d) <= mode.estimate_minutes(d + extra));
        }
    }
}
