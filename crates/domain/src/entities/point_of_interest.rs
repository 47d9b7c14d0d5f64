//! Point of interest entity

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, OsmId};

/// Shown when a venue carries no usable address tags
pub const ADDRESS_PLACEHOLDER: &str = "Đang cập nhật địa chỉ";

/// A food venue returned by a discovery search
///
/// Built once per search from a raw source record. A `PointOfInterest`
/// always has a resolved coordinate and a non-empty address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Stable identifier, unique within a result set
    pub id: OsmId,

    /// Display name, if the venue is named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `cuisine` tag (may be empty)
    #[serde(default)]
    pub cuisine: String,

    /// `dish` tag (may be empty)
    #[serde(default)]
    pub dish: String,

    /// All source tags
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Resolved coordinate (direct point or centroid)
    pub location: GeoLocation,

    /// Display address
    pub address: String,
}

impl PointOfInterest {
    /// Create a point of interest, pulling `name`, `cuisine` and `dish` from `tags`
    ///
    /// An empty `address` is replaced with [`ADDRESS_PLACEHOLDER`].
    #[must_use]
    pub fn new(
        id: OsmId,
        tags: BTreeMap<String, String>,
        location: GeoLocation,
        address: impl Into<String>,
    ) -> Self {
        let address = address.into();
        let address = if address.trim().is_empty() {
            ADDRESS_PLACEHOLDER.to_string()
        } else {
            address
        };

        Self {
            id,
            name: tags.get("name").filter(|n| !n.is_empty()).cloned(),
            cuisine: tags.get("cuisine").cloned().unwrap_or_default(),
            dish: tags.get("dish").cloned().unwrap_or_default(),
            tags,
            location,
            address,
        }
    }

    /// Look up a raw tag value
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Name for display, falling back to the category
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.category())
            .unwrap_or("?")
    }

    /// Venue category: the `amenity` tag, else the `shop` tag
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.tag("amenity").or_else(|| self.tag("shop"))
    }

    /// `opening_hours` tag
    #[must_use]
    pub fn opening_hours(&self) -> Option<&str> {
        self.tag("opening_hours")
    }

    /// Website, from `website` or `contact:website`
    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.tag("website").or_else(|| self.tag("contact:website"))
    }

    /// Phone number, from `phone` or `contact:phone`
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.tag("phone").or_else(|| self.tag("contact:phone"))
    }

    /// Straight-line distance from `origin` in meters
    #[must_use]
    pub fn distance_from(&self, origin: &GeoLocation) -> f64 {
        self.location.distance_m(origin)
    }
}
