//! Overpass service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Overpass API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Base URL of the Overpass API (the `/interpreter` endpoint is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Server-side query timeout in seconds, sent as `[timeout:N]`
    #[serde(default = "default_server_timeout_secs")]
    pub server_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://overpass-api.de/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    20
}

const fn default_server_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("FoodRadar/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            server_timeout_secs: default_server_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            server_timeout_secs: 10,
            ..Default::default()
        }
    }

    /// Full URL of the interpreter endpoint
    #[must_use]
    pub fn interpreter_url(&self) -> String {
        format!("{}/interpreter", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.server_timeout_secs == 0 {
            return Err("server_timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverpassConfig::default();
        assert_eq!(config.base_url, "https://overpass-api.de/api");
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.server_timeout_secs, 60);
        assert!(config.user_agent.starts_with("FoodRadar/"));
    }

    #[test]
    fn test_testing_config() {
        let config = OverpassConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.server_timeout_secs, 10);
    }

    #[test]
    fn test_interpreter_url() {
        let config = OverpassConfig {
            base_url: "http://localhost:1234/api/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.interpreter_url(), "http://localhost:1234/api/interpreter");
    }

    #[test]
    fn test_validation_success() {
        assert!(OverpassConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = OverpassConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = OverpassConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: OverpassConfig =
            serde_json::from_str(r#"{ "base_url": "http://mirror/api" }"#).unwrap();
        assert_eq!(config.base_url, "http://mirror/api");
        assert_eq!(config.timeout_secs, 20);
    }
}
