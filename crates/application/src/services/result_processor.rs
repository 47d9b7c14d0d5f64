//! Result processing
//!
//! Turns raw source records into [`PointOfInterest`] values: drops
//! duplicates, applies the keyword matching rules, resolves a display
//! address and a coordinate. Output keeps the source order.

use std::collections::HashSet;

use domain::entities::{ADDRESS_PLACEHOLDER, PointOfInterest};
use domain::value_objects::{GeoLocation, SearchKeyword};
use domain::{matches_attribute, matches_keywords};
use tracing::{debug, trace};

use crate::ports::RawPoiRecord;

/// Address tags joined, in this order, to form the display address
const ADDRESS_COMPONENTS: &[&str] = &["addr:housenumber", "addr:street", "addr:district"];

/// Filter and convert raw records
///
/// A record is kept when one of `keywords` occurs in its `cuisine` or
/// `dish` tag (plain substring), or otherwise matches its `name` under
/// the short-token word-boundary rule. Once a record with a given id has
/// matched, later records with the same id are skipped. Matching records
/// without a resolvable, valid coordinate are dropped.
#[must_use]
pub fn process(records: Vec<RawPoiRecord>, keywords: &[SearchKeyword]) -> Vec<PointOfInterest> {
    let total = records.len();
    let mut seen = HashSet::new();
    let mut pois = Vec::new();

    for record in records {
        if seen.contains(&record.id) {
            trace!(id = %record.id, "Skipping duplicate record");
            continue;
        }

        if !is_match(&record, keywords) {
            continue;
        }
        seen.insert(record.id);

        let address = resolve_address(&record);
        let Some(location) = resolve_location(&record) else {
            debug!(id = %record.id, "Dropping record without usable coordinate");
            continue;
        };

        pois.push(PointOfInterest::new(record.id, record.tags, location, address));
    }

    debug!(total, kept = pois.len(), "Processed source records");
    pois
}

fn is_match(record: &RawPoiRecord, keywords: &[SearchKeyword]) -> bool {
    let cuisine = record.tag("cuisine").unwrap_or_default();
    let dish = record.tag("dish").unwrap_or_default();

    matches_attribute(cuisine, keywords)
        || matches_attribute(dish, keywords)
        || matches_keywords(record.tag("name").unwrap_or_default(), keywords)
}

/// Build the display address for a record
///
/// Joins the present house number, street and district with `", "`;
/// without any of them the free-form `address` tag is used, and without
/// that the placeholder.
#[must_use]
pub fn resolve_address(record: &RawPoiRecord) -> String {
    let parts: Vec<&str> = ADDRESS_COMPONENTS
        .iter()
        .filter_map(|key| record.tag(key))
        .collect();

    if !parts.is_empty() {
        return parts.join(", ");
    }

    record
        .tag("address")
        .unwrap_or(ADDRESS_PLACEHOLDER)
        .to_string()
}

/// Resolve the coordinate of a record
///
/// Each axis prefers the point geometry and falls back to the centroid.
/// Returns `None` when an axis is missing or the pair is out of range.
#[must_use]
pub fn resolve_location(record: &RawPoiRecord) -> Option<GeoLocation> {
    let lat = record.lat.or_else(|| record.center.map(|(lat, _)| lat))?;
    let lon = record.lon.or_else(|| record.center.map(|(_, lon)| lon))?;
    GeoLocation::new(lat, lon).ok()
}
