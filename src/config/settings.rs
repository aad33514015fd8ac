//! Settings structures for City Letter Finder configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Settings that cannot be used to talk to the API
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api.base_url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("outgoing.request_timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),
}

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub outgoing: OutgoingSettings,
    pub ui: UiSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (CITYFINDER_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("CITYFINDER_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("CITYFINDER_BASE_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = var("CITYFINDER_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
    }

    /// Check the values the client depends on
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.api.base_url()?;
        let timeout = self.outgoing.request_timeout;
        if timeout <= 0.0 || Duration::try_from_secs_f64(timeout).is_err() {
            return Err(ConfigError::InvalidTimeout(timeout));
        }
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Location of the city API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Scheme, host and port of the backend
    pub base_url: String,
    /// Path of the count endpoint
    pub count_path: String,
    /// Path of the list endpoint
    pub list_path: String,
}

impl ApiSettings {
    /// Parsed base URL
    pub fn base_url(&self) -> std::result::Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            count_path: "/api/weather/cities/count".to_string(),
            list_path: "/api/weather/cities".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Appended to the default user agent
    pub useragent_suffix: Option<String>,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            useragent_suffix: None,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Show code, status, details, path and time in the error panel
    pub show_error_details: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_error_details: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8080");
        assert_eq!(settings.api.count_path, "/api/weather/cities/count");
        assert!(!settings.general.debug);
        assert!(settings.ui.show_error_details);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml(
            "api:\n  base_url: https://weather.example.com\noutgoing:\n  request_timeout: 2.5\n",
        )
        .unwrap();
        assert_eq!(settings.api.base_url, "https://weather.example.com");
        assert_eq!(settings.api.list_path, "/api/weather/cities");
        assert_eq!(settings.outgoing.request_timeout, 2.5);
        assert!(settings.outgoing.verify_ssl);
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| match key {
            "CITYFINDER_DEBUG" => Some("true".to_string()),
            "CITYFINDER_BASE_URL" => Some("http://10.0.0.2:9000".to_string()),
            "CITYFINDER_TIMEOUT" => Some("not-a-number".to_string()),
            _ => None,
        });
        assert!(settings.general.debug);
        assert_eq!(settings.api.base_url, "http://10.0.0.2:9000");
        assert_eq!(settings.outgoing.request_timeout, 5.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let mut settings = Settings::default();
        settings.outgoing.request_timeout = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_timeout_too_large_for_duration() {
        for timeout in [1e30, f64::MAX, f64::INFINITY, f64::NAN, -3.0] {
            let mut settings = Settings::default();
            settings.outgoing.request_timeout = timeout;
            assert!(
                matches!(settings.validate(), Err(ConfigError::InvalidTimeout(_))),
                "timeout {} accepted",
                timeout
            );
        }
    }
}
