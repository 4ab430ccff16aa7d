//! # Till Configuration
//!
//! Configuration for one counter terminal.
//!
//! ## Configuration Sources (in priority order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Loading                                │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     SKIL_API_KEY=...                                                    │
//! │     SKIL_RATES_URL=https://v6.exchangerate-api.com/v6/                  │
//! │     SKIL_CURRENCY=EUR                                                   │
//! │     SKIL_TILL_NAME="Counter 2"                                          │
//! │                                                                         │
//! │  2. Config File (till.toml)                                             │
//! │     Linux:   ~/.config/skil-till/till.toml                              │
//! │     macOS:   ~/Library/Application Support/is.skil.till/till.toml       │
//! │     Windows: %APPDATA%\skil\till\config\till.toml                       │
//! │                                                                         │
//! │  3. Defaults (lowest priority)                                          │
//! │     No API key, local currency, name "Till"                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! [till]
//! name = "Counter 2"
//! default_currency = "ISK"
//!
//! [rates]
//! base_url = "https://v6.exchangerate-api.com/v6/"
//! api_key = "your-key"
//! timeout_secs = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use skil_core::Currency;
use skil_rates::RateSourceConfig;

use crate::error::{TillError, TillResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "till.toml";

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete till configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TillConfig {
    #[serde(default)]
    pub till: TillSettings,

    /// Exchange-rate API settings, handed to the rate source as is.
    #[serde(default)]
    pub rates: RateSourceConfig,
}

/// Terminal identity and startup state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TillSettings {
    /// Shown in the view header and logs.
    #[serde(default = "default_name")]
    pub name: String,

    /// Display currency selected when the till starts.
    #[serde(default)]
    pub default_currency: Currency,
}

fn default_name() -> String {
    "Till".to_string()
}

impl Default for TillSettings {
    fn default() -> Self {
        TillSettings {
            name: default_name(),
            default_currency: Currency::LOCAL,
        }
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl TillConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Load from config file if it exists
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> TillResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading till config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| TillError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load till config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> TillResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| TillError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TillError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| TillError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Till config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TillResult<()> {
        if self.till.name.trim().is_empty() {
            return Err(TillError::InvalidConfig("till name must not be empty".into()));
        }

        self.rates.validate()?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SKIL_*` overrides read through `var`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("SKIL_API_KEY") {
            debug!("Overriding rate API key from environment");
            self.rates.api_key = key;
        }

        if let Some(url) = var("SKIL_RATES_URL") {
            debug!(url = %url, "Overriding rate API URL from environment");
            self.rates.base_url = url;
        }

        if let Some(code) = var("SKIL_CURRENCY") {
            match code.parse::<Currency>() {
                Ok(currency) => self.till.default_currency = currency,
                Err(_) => warn!(currency = %code, "Unknown currency in environment"),
            }
        }

        if let Some(name) = var("SKIL_TILL_NAME") {
            self.till.name = name;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("is", "skil", "till")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
