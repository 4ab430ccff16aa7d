//! # HTTP Rate Source
//!
//! Fetches `GET {base_url}/{api_key}/latest/{CODE}` from the exchange-rate
//! API and decodes the JSON answer into [`LatestRates`].
//!
//! The request URL carries the API key, so it is never logged and is
//! stripped from transport errors before they leave this module.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

use skil_core::{Currency, RateUnavailable, UnavailableReason};

use crate::config::RateSourceConfig;
use crate::error::RatesResult;
use crate::source::{LatestRates, RateSource};

/// Rate source backed by the exchange-rate HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HttpRateSource {
    /// Builds a source from explicit settings.
    pub fn new(config: &RateSourceConfig) -> RatesResult<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(HttpRateSource {
            client: builder.build()?,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// The lookup URL for `base`. The key is pushed as one path segment,
    /// so nothing in it can change the host.
    fn latest_url(&self, base: Currency) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(&self.api_key)
            .push("latest")
            .push(base.code());
        Some(url)
    }
}

fn transport(base: Currency, detail: impl Into<String>) -> RateUnavailable {
    RateUnavailable::new(base, UnavailableReason::Transport(detail.into()))
}

#[async_trait]
impl RateSource for HttpRateSource {
    fn name(&self) -> &'static str {
        "exchangerate-api"
    }

    async fn latest(&self, base: Currency) -> Result<LatestRates, RateUnavailable> {
        if self.api_key.is_empty() {
            return Err(RateUnavailable::new(base, UnavailableReason::MissingCredential));
        }

        let url = self
            .latest_url(base)
            .ok_or_else(|| transport(base, "rate API URL cannot take a path"))?;

        debug!(
            host = self.base_url.host_str().unwrap_or_default(),
            currency = %base,
            "Requesting latest rates"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(base, e.without_url().to_string()))?;

        let status = response.status();
        let payload = response.json::<LatestRates>().await.map_err(|e| {
            transport(base, format!("HTTP {}: {}", status, e.without_url()))
        })?;

        debug!(
            currency = %base,
            http_status = status.as_u16(),
            result = %payload.result,
            "Rate API answered"
        );

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer, api_key: &str) -> HttpRateSource {
        HttpRateSource::new(&RateSourceConfig::new(server.uri(), api_key)).unwrap()
    }

    #[test]
    fn test_latest_url_layout() {
        let source =
            HttpRateSource::new(&RateSourceConfig::new("https://rates.example.com/v6", "k3y"))
                .unwrap();
        assert_eq!(
            source.latest_url(Currency::Eur).unwrap().as_str(),
            "https://rates.example.com/v6/k3y/latest/EUR"
        );

        let source =
            HttpRateSource::new(&RateSourceConfig::new("https://rates.example.com/v6/", "k3y"))
                .unwrap();
        assert_eq!(
            source.latest_url(Currency::Usd).unwrap().as_str(),
            "https://rates.example.com/v6/k3y/latest/USD"
        );
    }

    #[test]
    fn test_key_cannot_replace_host() {
        let source =
            HttpRateSource::new(&RateSourceConfig::new("https://rates.example.com/v6/", "ab:cd"))
                .unwrap();
        let url = source.latest_url(Currency::Eur).unwrap();
        assert_eq!(url.host_str(), Some("rates.example.com"));
        assert_eq!(url.path(), "/v6/ab:cd/latest/EUR");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(HttpRateSource::new(&RateSourceConfig::new("ftp://x", "k")).is_err());
    }

    #[tokio::test]
    async fn test_success_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/test-key/latest/EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": "success",
                "base_code": "EUR",
                "conversion_rates": { "EUR": 1, "ISK": 150.25, "USD": 1.08 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let rates = source_for(&server, "test-key")
            .latest(Currency::Eur)
            .await
            .unwrap();
        assert!(rates.is_success());
        assert_eq!(rates.local_rate(Currency::Eur).unwrap(), 150.25);
    }

    #[tokio::test]
    async fn test_error_payload_is_returned_not_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bad-key/latest/USD"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "result": "error",
                "error-type": "invalid-key"
            })))
            .mount(&server)
            .await;

        let rates = source_for(&server, "bad-key")
            .latest(Currency::Usd)
            .await
            .unwrap();
        assert!(!rates.is_success());
        assert_eq!(rates.error_type.as_deref(), Some("invalid-key"));
    }

    #[tokio::test]
    async fn test_unreadable_body_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = source_for(&server, "test-key")
            .latest(Currency::Eur)
            .await
            .unwrap_err();
        match err.reason {
            UnavailableReason::Transport(detail) => {
                assert!(detail.starts_with("HTTP 502"));
                assert!(!detail.contains("test-key"));
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = source_for(&server, "")
            .latest(Currency::Eur)
            .await
            .unwrap_err();
        assert_eq!(err.reason, UnavailableReason::MissingCredential);
    }
}
