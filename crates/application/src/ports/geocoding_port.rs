//! Geocoding port
//!
//! Resolves a free-text place name to a coordinate.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A place name resolved to a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    /// Display name reported by the geocoder
    pub name: String,
    /// Resolved coordinate
    pub location: GeoLocation,
}

/// Port for geocoding services
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve `place` to a coordinate
    ///
    /// Returns `Ok(None)` when the place is unknown; errors are reserved for
    /// transport and decoding failures.
    async fn geocode(&self, place: &str) -> Result<Option<GeocodedLocation>, ApplicationError>;
}
