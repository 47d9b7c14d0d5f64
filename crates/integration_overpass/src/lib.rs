//! OpenStreetMap integration for FoodRadar
//!
//! Finds food venues around a coordinate through the
//! [Overpass API](https://overpass-api.de) and resolves place names to
//! coordinates via [Nominatim](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! [`OverpassQueryBuilder`] renders an Overpass QL query for a radius,
//! coordinate and keyword set. [`OverpassClient`] defines the fetch
//! interface, implemented by [`HttpOverpassClient`]. [`GeocodingClient`]
//! handles place-name lookup via [`NominatimGeocodingClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::SearchKeyword;
//! use integration_overpass::{HttpOverpassClient, OverpassClient, OverpassConfig, OverpassQueryBuilder};
//!
//! let config = OverpassConfig::default();
//! let client = HttpOverpassClient::new(&config)?;
//! let query = OverpassQueryBuilder::from_config(&config).build(
//!     21.0285, 105.8542, // Hoan Kiem
//!     1000,              // meters
//!     &[SearchKeyword::new("phở"), SearchKeyword::new("pho")],
//! );
//!
//! let elements = client.fetch(&query).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;
mod query;

pub use client::{HttpOverpassClient, OverpassClient};
pub use config::OverpassConfig;
pub use error::OverpassError;
pub use geocoding::{
    GeocodedPlace, GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
pub use models::{OverpassCenter, OverpassElement, OverpassResponse};
pub use query::{FOOD_AMENITIES, FOOD_SHOPS, OverpassQueryBuilder, escape_pattern};
