//! Overpass JSON response models

use std::collections::BTreeMap;

use domain::value_objects::{ElementKind, OsmId};
use serde::{Deserialize, Serialize};

/// Top-level Overpass JSON document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverpassResponse {
    /// Matched elements (absent means none)
    #[serde(default)]
    pub elements: Vec<OverpassElement>,

    /// Server remark, set when the query hit a runtime error or timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// A single node, way or relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassElement {
    /// Element type (`node`, `way`, `relation`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,

    /// Numeric OSM id
    pub id: i64,

    /// Latitude (nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    /// Longitude (nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,

    /// Centroid requested with `out center` (ways and relations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<OverpassCenter>,

    /// OSM tags
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassElement {
    /// Typed identifier combining element type and id
    #[must_use]
    pub fn osm_id(&self) -> OsmId {
        let kind = self
            .element_type
            .as_deref()
            .map_or(ElementKind::Unknown, ElementKind::from_osm_type);
        OsmId::new(kind, self.id)
    }
}

/// Computed centroid of a non-point element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverpassCenter {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}
