//! Nominatim adapter - Implements GeocodingPort using integration_overpass

use application::error::ApplicationError;
use application::ports::{GeocodedLocation, GeocodingPort};
use async_trait::async_trait;
use integration_overpass::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use tracing::{debug, instrument};

/// Geocoder backed by Nominatim
#[derive(Debug)]
pub struct NominatimGeocoder {
    client: NominatimGeocodingClient,
}

impl NominatimGeocoder {
    /// Wrap an existing client
    pub const fn new(client: NominatimGeocodingClient) -> Self {
        Self { client }
    }

    /// Create a geocoder from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        NominatimGeocodingClient::new(config)
            .map(Self::new)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<Option<GeocodedLocation>, ApplicationError> {
        match self.client.geocode(place).await {
            Ok(resolved) => Ok(Some(GeocodedLocation {
                name: resolved.name,
                location: resolved.location,
            })),
            Err(GeocodingError::PlaceNotFound(_)) => {
                debug!(%place, "Place not found");
                Ok(None)
            },
            Err(e) => Err(ApplicationError::ExternalService(format!(
                "Geocoding failed: {e}"
            ))),
        }
    }
}
