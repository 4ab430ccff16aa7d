//! # Error Types
//!
//! Domain-specific error types for skil-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  skil-core errors (this file)                                          │
//! │  ├── ValidationError   - Count/currency input rejected at the boundary │
//! │  ├── RateUnavailable   - No usable exchange rate for a currency        │
//! │  └── ConversionFailure - RateUnavailable during an amount conversion   │
//! │                                                                         │
//! │  skil-rates errors (separate crate)                                    │
//! │  └── RatesError        - Rate source configuration failures            │
//! │                                                                         │
//! │  till errors (in app)                                                  │
//! │  └── TillError         - Config file and terminal I/O                  │
//! │                                                                         │
//! │  Flow: RateUnavailable → ConversionFailure → till falls back to ISK    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal to a till session. Validation errors become a
//! per-field flag, conversion errors become a local-currency fallback.

use thiserror::Error;

use crate::currency::Currency;
use crate::money::Money;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a value reaches the ledger. The ledger itself only ever
/// sees valid non-negative counts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Input is not a whole number.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Negative counts are not accepted.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// The input field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Rate Unavailable
// =============================================================================

/// Why no exchange rate could be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnavailableReason {
    /// The request never produced a readable response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The rate API answered with a non-success result code.
    #[error("rate API returned status '{0}'")]
    Status(String),

    /// The payload had no entry for the local currency.
    #[error("local currency {0} missing from rate table")]
    MissingLocalRate(String),

    /// The local entry was zero, negative or not a number.
    #[error("rate {0} is not a positive number")]
    InvalidRate(f64),

    /// No API credential is configured.
    #[error("no API key configured")]
    MissingCredential,
}

/// No valid exchange rate exists for a currency right now.
///
/// The cache never substitutes a stale or guessed rate, so this is
/// surfaced to the caller every time.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Exchange rate for {currency} unavailable: {reason}")]
pub struct RateUnavailable {
    pub currency: Currency,
    #[source]
    pub reason: UnavailableReason,
}

impl RateUnavailable {
    pub fn new(currency: Currency, reason: UnavailableReason) -> Self {
        RateUnavailable { currency, reason }
    }

    /// Returns true if a later attempt might succeed without config changes.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.reason,
            UnavailableReason::Transport(_) | UnavailableReason::Status(_)
        )
    }
}

// =============================================================================
// Conversion Failure
// =============================================================================

/// A local amount could not be shown in the requested currency.
///
/// Carries the untouched local amount so the caller can fall back to it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Could not convert {amount} {} to {target}: {source}", Currency::LOCAL)]
pub struct ConversionFailure {
    pub amount: Money,
    pub target: Currency,
    #[source]
    pub source: RateUnavailable,
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Negative {
            field: "cans".to_string(),
        };
        assert_eq!(err.to_string(), "cans cannot be negative");
        assert_eq!(err.field(), "cans");

        let err = ValidationError::Required {
            field: "bottles".to_string(),
        };
        assert_eq!(err.to_string(), "bottles is required");
    }

    #[test]
    fn test_rate_unavailable_message() {
        let err = RateUnavailable::new(
            Currency::Eur,
            UnavailableReason::Status("error".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Exchange rate for EUR unavailable: rate API returned status 'error'"
        );
        assert!(err.is_retryable());
        assert!(!RateUnavailable::new(Currency::Eur, UnavailableReason::MissingCredential)
            .is_retryable());
    }

    #[test]
    fn test_conversion_failure_keeps_local_amount() {
        let err = ConversionFailure {
            amount: Money::from_units(110),
            target: Currency::Usd,
            source: RateUnavailable::new(
                Currency::Usd,
                UnavailableReason::MissingLocalRate("ISK".to_string()),
            ),
        };
        assert_eq!(err.amount.units(), 110);
        assert!(err.to_string().starts_with("Could not convert 110 ISK to USD"));
    }
}
