//! # Rates Error Types
//!
//! Lookup failures are reported as [`skil_core::RateUnavailable`], which the
//! ledger and till already understand. This module covers everything around
//! the lookup: configuring the source and building its client.

use thiserror::Error;

/// Result type alias for rate source setup.
pub type RatesResult<T> = Result<T, RatesError>;

/// Errors raised while configuring or constructing a rate source.
#[derive(Debug, Error)]
pub enum RatesError {
    /// Invalid rate source configuration.
    #[error("Invalid rate source configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid rate API URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    ClientBuild(String),
}

impl From<url::ParseError> for RatesError {
    fn from(err: url::ParseError) -> Self {
        RatesError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for RatesError {
    fn from(err: reqwest::Error) -> Self {
        RatesError::ClientBuild(err.to_string())
    }
}

impl RatesError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(self, RatesError::InvalidConfig(_) | RatesError::InvalidUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_error_converts() {
        let err: RatesError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, RatesError::InvalidUrl(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_client_error_is_not_config() {
        assert!(!RatesError::ClientBuild("tls".into()).is_config_error());
    }
}
