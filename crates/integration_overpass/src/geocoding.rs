//! Nominatim geocoding client
//!
//! Resolves a free-text place name to a coordinate using the
//! [Nominatim](https://nominatim.openstreetmap.org) API.
//!
//! Requests are spaced at least 1.1 s apart (Nominatim usage policy) and
//! successful lookups are cached to keep repeated searches off the wire.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1100);

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Comma-separated ISO country codes to restrict results (empty = worldwide)
    #[serde(default)]
    pub country_filter: String,

    /// Preferred language for display names
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_language() -> String {
    "vi".to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: String::new(),
            language: default_language(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Place could not be resolved to coordinates
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Full display name as reported by the geocoder
    pub name: String,
    /// Coordinate of the place
    pub location: GeoLocation,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form place name to a coordinate
    async fn geocode(&self, place: &str) -> Result<GeocodedPlace, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, GeocodedPlace>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("FoodRadar/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_hours > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_hours * 3600))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce Nominatim's rate limit (max 1 request per second)
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                let wait = MIN_REQUEST_INTERVAL.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn to_place(result: &NominatimResult) -> Result<GeocodedPlace, GeocodingError> {
        let lat: f64 = result
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid latitude".to_string()))?;
        let lon: f64 = result
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid longitude".to_string()))?;
        let location =
            GeoLocation::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(GeocodedPlace {
            name: result.display_name.clone().unwrap_or_default(),
            location,
        })
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<GeocodedPlace, GeocodingError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(GeocodingError::PlaceNotFound(
                "Place must not be empty".to_string(),
            ));
        }

        let cache_key = place.to_lowercase();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!(%place, "Geocoding cache hit");
                return Ok(hit);
            }
        }

        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("q", place.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
            ("accept-language", self.config.language.clone()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%place, "Geocoding place");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let result = results
            .first()
            .ok_or_else(|| GeocodingError::PlaceNotFound(place.to_string()))?;

        let resolved = Self::to_place(result)?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, resolved.clone()).await;
        }
        debug!(%place, location = %resolved.location, "Geocoded place");

        Ok(resolved)
    }
}

/// Raw Nominatim API response
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}
