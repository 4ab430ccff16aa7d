//! # Rate Sources
//!
//! A [`RateSource`] answers "latest rates anchored to currency X". The cache
//! only relies on three things from the answer: the result code, the rate
//! mapping, and the local-currency entry inside it.
//!
//! ## Payload
//! ```json
//! {
//!   "result": "success",
//!   "base_code": "EUR",
//!   "conversion_rates": { "EUR": 1, "ISK": 150.2, "USD": 1.08 }
//! }
//! ```
//! On failure the API answers `{ "result": "error", "error-type": "invalid-key" }`.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use skil_core::{Currency, RateUnavailable, UnavailableReason};

/// Result code of a successful lookup.
pub const SUCCESS_RESULT: &str = "success";

/// One "latest rates" answer from the remote API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LatestRates {
    /// `"success"` or an error code.
    pub result: String,

    #[serde(default)]
    pub base_code: Option<String>,

    /// Units of each currency per 1 unit of the base currency.
    #[serde(default)]
    pub conversion_rates: HashMap<String, f64>,

    /// Error detail sent alongside a non-success result.
    #[serde(rename = "error-type", default)]
    pub error_type: Option<String>,
}

impl LatestRates {
    /// A successful answer anchored to `base`.
    pub fn success<'a>(base: Currency, rates: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        LatestRates {
            result: SUCCESS_RESULT.to_string(),
            base_code: Some(base.code().to_string()),
            conversion_rates: rates
                .into_iter()
                .map(|(code, rate)| (code.to_string(), rate))
                .collect(),
            error_type: None,
        }
    }

    /// A failed answer with the given error type.
    pub fn failure(error_type: &str) -> Self {
        LatestRates {
            result: "error".to_string(),
            error_type: Some(error_type.to_string()),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == SUCCESS_RESULT
    }

    /// Extracts "ISK per 1 unit of `base`" from this answer.
    ///
    /// Fails on a non-success result, a missing local entry, or a local entry
    /// that is not a positive finite number.
    pub fn local_rate(&self, base: Currency) -> Result<f64, RateUnavailable> {
        if !self.is_success() {
            let status = match &self.error_type {
                Some(detail) => format!("{} ({})", self.result, detail),
                None => self.result.clone(),
            };
            return Err(RateUnavailable::new(base, UnavailableReason::Status(status)));
        }

        let local = Currency::LOCAL.code();
        let rate = *self.conversion_rates.get(local).ok_or_else(|| {
            RateUnavailable::new(base, UnavailableReason::MissingLocalRate(local.to_string()))
        })?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(RateUnavailable::new(base, UnavailableReason::InvalidRate(rate)));
        }

        Ok(rate)
    }
}

/// Something that can fetch the latest rate table for a currency.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Latest rates anchored to `base`.
    ///
    /// Transport-level failures are returned as errors. A readable answer is
    /// returned as is, even when its result code is not a success; the cache
    /// makes that call.
    async fn latest(&self, base: Currency) -> Result<LatestRates, RateUnavailable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_rate_from_success() {
        let rates = LatestRates::success(Currency::Eur, [("EUR", 1.0), ("ISK", 150.0)]);
        assert!(rates.is_success());
        assert_eq!(rates.local_rate(Currency::Eur).unwrap(), 150.0);
    }

    #[test]
    fn test_non_success_status() {
        let rates = LatestRates::failure("invalid-key");
        let err = rates.local_rate(Currency::Usd).unwrap_err();
        assert_eq!(err.currency, Currency::Usd);
        assert_eq!(
            err.reason,
            UnavailableReason::Status("error (invalid-key)".to_string())
        );
    }

    #[test]
    fn test_missing_local_rate() {
        let rates = LatestRates::success(Currency::Eur, [("EUR", 1.0), ("USD", 1.08)]);
        let err = rates.local_rate(Currency::Eur).unwrap_err();
        assert_eq!(err.reason, UnavailableReason::MissingLocalRate("ISK".to_string()));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let rates = LatestRates::success(Currency::Eur, [("ISK", bad)]);
            assert!(matches!(
                rates.local_rate(Currency::Eur).unwrap_err().reason,
                UnavailableReason::InvalidRate(_)
            ));
        }
    }

    #[test]
    fn test_payload_deserializes() {
        let json = r#"{
            "result": "success",
            "base_code": "USD",
            "time_last_update_unix": 1700000000,
            "conversion_rates": { "USD": 1, "ISK": 138.5, "EUR": 0.92 }
        }"#;
        let rates: LatestRates = serde_json::from_str(json).unwrap();
        assert_eq!(rates.base_code.as_deref(), Some("USD"));
        assert_eq!(rates.local_rate(Currency::Usd).unwrap(), 138.5);

        let json = r#"{ "result": "error", "error-type": "unsupported-code" }"#;
        let rates: LatestRates = serde_json::from_str(json).unwrap();
        assert!(!rates.is_success());
        assert!(rates.conversion_rates.is_empty());
    }
}
