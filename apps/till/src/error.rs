//! # Till Error Type
//!
//! Failures of the till's outer shell: config file handling and terminal
//! I/O. Input mistakes and unavailable exchange rates are not errors at
//! this level. They are shown in the view and the loop keeps going.

use skil_rates::RatesError;
use thiserror::Error;

/// Errors that can stop the till from starting or keep running.
#[derive(Debug, Error)]
pub enum TillError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Config values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The rate source rejected its settings.
    #[error("Rate source: {0}")]
    Rates(#[from] RatesError),

    // =========================================================================
    // Terminal Errors
    // =========================================================================
    /// Reading input or writing the view failed.
    #[error("Terminal I/O failed: {0}")]
    Io(String),
}

/// Result type alias for till operations.
pub type TillResult<T> = Result<T, TillError>;

impl From<std::io::Error> for TillError {
    fn from(err: std::io::Error) -> Self {
        TillError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for TillError {
    fn from(err: toml::de::Error) -> Self {
        TillError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for TillError {
    fn from(err: toml::ser::Error) -> Self {
        TillError::ConfigSaveFailed(err.to_string())
    }
}

impl TillError {
    /// Returns true if this error comes from configuration.
    pub fn is_config_error(&self) -> bool {
        match self {
            TillError::ConfigLoadFailed(_)
            | TillError::ConfigSaveFailed(_)
            | TillError::InvalidConfig(_) => true,
            TillError::Rates(inner) => inner.is_config_error(),
            TillError::Io(_) => false,
        }
    }
}
