//! Overpass adapter - Implements PoiSourcePort using integration_overpass

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{PoiSourcePort, RawPoiRecord};
use async_trait::async_trait;
use domain::value_objects::{GeoLocation, SearchKeyword};
use integration_overpass::{
    HttpOverpassClient, OverpassClient, OverpassConfig, OverpassElement, OverpassError,
    OverpassQueryBuilder,
};
use tracing::{debug, instrument};

/// Candidate source backed by the Overpass API
pub struct OverpassPoiSource {
    client: Arc<dyn OverpassClient>,
    query_builder: OverpassQueryBuilder,
}

impl std::fmt::Debug for OverpassPoiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverpassPoiSource")
            .field("query_builder", &self.query_builder)
            .finish_non_exhaustive()
    }
}

impl OverpassPoiSource {
    /// Create an adapter around an existing client
    pub fn new(client: Arc<dyn OverpassClient>, query_builder: OverpassQueryBuilder) -> Self {
        Self {
            client,
            query_builder,
        }
    }

    /// Create an adapter with an HTTP client built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn from_config(config: &OverpassConfig) -> Result<Self, ApplicationError> {
        let client = HttpOverpassClient::new(config).map_err(map_error)?;
        Ok(Self::new(
            Arc::new(client),
            OverpassQueryBuilder::from_config(config),
        ))
    }

    fn to_record(element: OverpassElement) -> RawPoiRecord {
        RawPoiRecord {
            id: element.osm_id(),
            lat: element.lat,
            lon: element.lon,
            center: element.center.map(|c| (c.lat, c.lon)),
            tags: element.tags,
        }
    }
}

#[async_trait]
impl PoiSourcePort for OverpassPoiSource {
    #[instrument(skip(self, keywords), fields(keywords = keywords.len()))]
    async fn fetch_candidates(
        &self,
        center: &GeoLocation,
        radius_m: u32,
        keywords: &[SearchKeyword],
    ) -> Result<Vec<RawPoiRecord>, ApplicationError> {
        let query =
            self.query_builder
                .build(center.latitude(), center.longitude(), radius_m, keywords);

        let elements = self.client.fetch(&query).await.map_err(map_error)?;
        debug!(count = elements.len(), "Overpass candidates fetched");

        Ok(elements.into_iter().map(Self::to_record).collect())
    }
}

fn map_error(err: OverpassError) -> ApplicationError {
    match err {
        OverpassError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
        OverpassError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(format!("Overpass request failed: {other}")),
    }
}
