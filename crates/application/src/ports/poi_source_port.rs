//! Point-of-interest source port
//!
//! Defines the interface for fetching raw venue records around a coordinate.
//! The Overpass adapter in the infrastructure layer implements this port.

use std::collections::BTreeMap;

use async_trait::async_trait;
use domain::value_objects::{GeoLocation, OsmId, SearchKeyword};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A venue record as delivered by the data source, before filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoiRecord {
    /// Source identifier
    pub id: OsmId,
    /// Latitude of a point geometry
    pub lat: Option<f64>,
    /// Longitude of a point geometry
    pub lon: Option<f64>,
    /// Computed centroid `(lat, lon)` of a way or relation
    pub center: Option<(f64, f64)>,
    /// Attribute tags
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl RawPoiRecord {
    /// Create a record with no coordinate
    #[must_use]
    pub fn new(id: OsmId, tags: BTreeMap<String, String>) -> Self {
        Self {
            id,
            lat: None,
            lon: None,
            center: None,
            tags,
        }
    }

    /// Attach a point coordinate
    #[must_use]
    pub const fn with_point(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    /// Attach a centroid
    #[must_use]
    pub const fn with_center(mut self, lat: f64, lon: f64) -> Self {
        self.center = Some((lat, lon));
        self
    }

    /// Look up a tag, treating an empty value as absent
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Port for fetching candidate venues
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PoiSourcePort: Send + Sync {
    /// Fetch the food venues within `radius_m` of `center` whose name,
    /// cuisine or dish mentions one of `keywords`
    ///
    /// The source may over-approximate; the caller applies the exact
    /// matching rules afterwards.
    async fn fetch_candidates(
        &self,
        center: &GeoLocation,
        radius_m: u32,
        keywords: &[SearchKeyword],
    ) -> Result<Vec<RawPoiRecord>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use domain::value_objects::ElementKind;

    use super::*;

    #[test]
    fn test_builder_helpers() {
        let record = RawPoiRecord::new(OsmId::new(ElementKind::Way, 7), BTreeMap::new())
            .with_center(21.0, 105.8);
        assert_eq!(record.center, Some((21.0, 105.8)));
        assert!(record.lat.is_none());

        let record = record.with_point(21.1, 105.9);
        assert_eq!(record.lat, Some(21.1));
        assert_eq!(record.lon, Some(105.9));
    }

    #[test]
    fn test_tag_ignores_empty_values() {
        let tags = BTreeMap::from([
            ("name".to_string(), "Phở Thìn".to_string()),
            ("addr:street".to_string(), String::new()),
        ]);
        let record = RawPoiRecord::new(OsmId::new(ElementKind::Node, 1), tags);
        assert_eq!(record.tag("name"), Some("Phở Thìn"));
        assert_eq!(record.tag("addr:street"), None);
        assert_eq!(record.tag("missing"), None);
    }

    #[tokio::test]
    async fn test_mock_port() {
        let mut mock = MockPoiSourcePort::new();
        mock.expect_fetch_candidates()
            .returning(|_, _, _| {
                Ok(vec![RawPoiRecord::new(
                    OsmId::new(ElementKind::Node, 1),
                    BTreeMap::new(),
                )])
            });

        let records = mock
            .fetch_candidates(&GeoLocation::hanoi(), 500, &[SearchKeyword::new("pho")])
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }
}
