//! # Rate Source Configuration
//!
//! Settings the HTTP rate source needs at construction time. This is the
//! `[rates]` section of the till's config file.
//!
//! ```toml
//! [rates]
//! base_url = "https://v6.exchangerate-api.com/v6/"
//! api_key = "your-key"
//! timeout_secs = 10   # optional, transport default when omitted
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{RatesError, RatesResult};

/// Connection settings for the exchange-rate API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSourceConfig {
    /// API root. Requests go to `{base_url}/{api_key}/latest/{CODE}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API credential. Empty means foreign currencies are unavailable.
    #[serde(default)]
    pub api_key: String,

    /// Whole-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://v6.exchangerate-api.com/v6/".to_string()
}

impl Default for RateSourceConfig {
    fn default() -> Self {
        RateSourceConfig {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

impl RateSourceConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        RateSourceConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: None,
        }
    }

    /// Validates the settings.
    pub fn validate(&self) -> RatesResult<()> {
        let url = Url::parse(&self.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(RatesError::InvalidUrl(format!(
                "Rate API URL must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self
            .api_key
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace())
        {
            return Err(RatesError::InvalidConfig(
                "api_key must not contain '/', '?', '#' or whitespace".into(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(RatesError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Returns true if an API key is set.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateSourceConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.has_api_key());
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_validation() {
        let mut config = RateSourceConfig::new("https://rates.example.com/v6", "abc123");
        assert!(config.validate().is_ok());

        config.base_url = "ftp://rates.example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://localhost:8080".to_string();
        config.api_key = "has space".to_string();
        assert!(config.validate().is_err());

        config.api_key = "abc123".to_string();
        config.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_section() {
        let config: RateSourceConfig = toml::from_str(r#"api_key = "k""#).unwrap();
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.api_key, "k");
    }
}
