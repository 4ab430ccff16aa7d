//! # Rate Cache
//!
//! Keeps one exchange rate per foreign currency for up to 24 hours.
//!
//! ## Freshness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetched_at = T                                                         │
//! │                                                                         │
//! │  T ──────────────────────────────── T+24h ───────────────────────►     │
//! │  │◄──────────── valid (served) ─────►│◄──── invalid (refetch) ────►    │
//! │                                                                         │
//! │  No stale fallback: once the window closes, a failed refetch is an     │
//! │  error, never the old rate.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The local currency never enters the cache. Its rate is exactly 1.0.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use skil_core::{Currency, CurrencyConverter, Money, RateUnavailable};

use crate::clock::{Clock, SystemClock};
use crate::source::RateSource;

/// How long a fetched rate stays valid.
pub const CACHE_VALIDITY_HOURS: i64 = 24;

/// A rate as fetched, with its fetch time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedRate {
    pub currency: Currency,

    /// ISK per 1 unit of `currency`.
    pub rate: f64,

    pub fetched_at: DateTime<Utc>,
}

impl CachedRate {
    /// Time since the fetch.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// True while `now - fetched_at < 24h`.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.age(now) < Duration::hours(CACHE_VALIDITY_HOURS)
    }
}

/// Per-currency exchange-rate cache in front of a [`RateSource`].
///
/// Single writer: every method that can fetch takes `&mut self`.
pub struct RateCache {
    source: Box<dyn RateSource>,
    clock: Arc<dyn Clock>,
    entries: HashMap<Currency, CachedRate>,
}

impl RateCache {
    /// A cache over `source` using wall-clock time.
    pub fn new(source: impl RateSource + 'static) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    /// A cache over `source` reading time from `clock`.
    pub fn with_clock(source: impl RateSource + 'static, clock: Arc<dyn Clock>) -> Self {
        RateCache {
            source: Box::new(source),
            clock,
            entries: HashMap::new(),
        }
    }

    /// ISK per 1 unit of `currency`.
    ///
    /// ## Flow
    /// 1. Local currency: `1.0`, nothing else happens
    /// 2. Valid cached entry: its rate
    /// 3. Otherwise fetch, store with `fetched_at = now`, return
    ///
    /// A failed fetch stores nothing, so the next call fetches again.
    pub async fn get_rate(&mut self, currency: Currency) -> Result<f64, RateUnavailable> {
        if currency.is_local() {
            return Ok(1.0);
        }

        let now = self.clock.now();
        if let Some(entry) = self.entries.get(&currency) {
            if entry.is_valid(now) {
                debug!(
                    currency = %currency,
                    rate = entry.rate,
                    age_mins = entry.age(now).num_minutes(),
                    "Using cached rate"
                );
                return Ok(entry.rate);
            }
            debug!(currency = %currency, "Cached rate expired");
        }

        let rate = match self.fetch(currency).await {
            Ok(rate) => rate,
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    currency = %currency,
                    error = %e,
                    "Rate fetch failed"
                );
                return Err(e);
            }
        };

        let fetched_at = self.clock.now();
        self.entries.insert(
            currency,
            CachedRate {
                currency,
                rate,
                fetched_at,
            },
        );
        info!(
            source = self.source.name(),
            currency = %currency,
            rate,
            "Fetched exchange rate"
        );

        Ok(rate)
    }

    async fn fetch(&self, currency: Currency) -> Result<f64, RateUnavailable> {
        let table = self.source.latest(currency).await?;
        table.local_rate(currency)
    }

    /// `amount` (ISK) expressed in `target`.
    ///
    /// Zero returns `0.0` and local targets return the amount unchanged,
    /// both without a lookup. Otherwise `amount / rate`.
    pub async fn convert(
        &mut self,
        amount: Money,
        target: Currency,
    ) -> Result<f64, RateUnavailable> {
        if amount.is_zero() {
            return Ok(0.0);
        }
        if target.is_local() {
            return Ok(amount.as_f64());
        }

        let rate = self.get_rate(target).await?;
        Ok(amount.as_f64() / rate)
    }

    /// Drops every cached rate. The next lookup per currency refetches.
    pub fn clear_cache(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        info!(dropped, "Rate cache cleared");
    }

    /// The stored entry for `currency`, valid or not.
    pub fn cached(&self, currency: Currency) -> Option<&CachedRate> {
        self.entries.get(&currency)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CurrencyConverter for RateCache {
    async fn rate(&mut self, currency: Currency) -> Result<f64, RateUnavailable> {
        self.get_rate(currency).await
    }

    async fn convert(&mut self, amount: Money, target: Currency) -> Result<f64, RateUnavailable> {
        RateCache::convert(self, amount, target).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
