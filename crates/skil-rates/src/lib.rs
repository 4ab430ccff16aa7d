//! # skil-rates: Exchange-Rate Cache for Skil POS
//!
//! Fronts a remote exchange-rate API with a 24 hour per-currency cache and
//! converts local amounts into the display currency.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RateCache::get_rate(EUR)                         │
//! │                                                                         │
//! │   EUR is local? ──yes──► 1.0                (no cache, no network)      │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │   cached & age < 24h? ──yes──► cached rate                              │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │   RateSource::latest(EUR)  ──►  { result, conversion_rates }            │
//! │        │                                                                │
//! │        ├── transport error      ──► RateUnavailable (nothing stored)   │
//! │        ├── result != "success"  ──► RateUnavailable (nothing stored)   │
//! │        ├── no ISK entry         ──► RateUnavailable (nothing stored)   │
//! │        ▼                                                                │
//! │   store { rate, fetched_at: now } ──► rate                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`cache`] - `RateCache`, the 24h cache and converter
//! - [`clock`] - Injectable time source
//! - [`source`] - `RateSource` trait and payload types
//! - [`http`] - `HttpRateSource` against the exchange-rate API
//! - [`config`] - Rate source settings
//! - [`error`] - Error types

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod source;

pub use cache::{CachedRate, RateCache, CACHE_VALIDITY_HOURS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RateSourceConfig;
pub use error::{RatesError, RatesResult};
pub use http::HttpRateSource;
pub use source::{LatestRates, RateSource, SUCCESS_RESULT};
