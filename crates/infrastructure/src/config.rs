//! Application configuration
//!
//! Layered: built-in defaults, then an optional `foodradar.toml`, then
//! `FOODRADAR__SECTION__KEY` environment variables.

use std::path::Path;
use std::time::Duration;

use application::services::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_MAX_RADIUS_M, SearchCacheConfig,
};
use integration_overpass::{NominatimConfig, OverpassConfig};
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

/// Name of the optional configuration file (extension resolved by `config`)
pub const CONFIG_FILE_NAME: &str = "foodradar";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "FOODRADAR";

/// Search behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius used when the caller does not give one
    #[serde(default = "default_radius_m")]
    pub default_radius_m: u32,

    /// Largest accepted radius
    #[serde(default = "default_max_radius_m")]
    pub max_radius_m: u32,

    /// How long search results stay cached in a long-lived host
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached searches
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
}

const fn default_radius_m() -> u32 {
    1000
}

const fn default_max_radius_m() -> u32 {
    DEFAULT_MAX_RADIUS_M
}

const fn default_cache_ttl_secs() -> u64 {
    3600
}

const fn default_cache_max_entries() -> usize {
    DEFAULT_CACHE_MAX_ENTRIES
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_m: default_radius_m(),
            max_radius_m: default_max_radius_m(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
        }
    }
}

impl SearchConfig {
    /// Settings for the search cache
    #[must_use]
    pub const fn cache_config(&self) -> SearchCacheConfig {
        SearchCacheConfig {
            ttl: Duration::from_secs(self.cache_ttl_secs),
            max_entries: self.cache_max_entries,
        }
    }

    /// Validate the settings
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_radius_m == 0 {
            return Err("search.max_radius_m must be greater than 0".to_string());
        }
        if self.default_radius_m == 0 || self.default_radius_m > self.max_radius_m {
            return Err(format!(
                "search.default_radius_m must be between 1 and {}",
                self.max_radius_m
            ));
        }
        Ok(())
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overpass API client
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Nominatim geocoder
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `foodradar.{toml,yaml,json}` in the working
    /// directory (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(CONFIG_FILE_NAME).required(false))
    }

    /// Load configuration from an explicit file and the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            // e.g. FOODRADAR__SEARCH__DEFAULT_RADIUS_M=1500
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.overpass.validate()?;
        self.search.validate()
    }
}
