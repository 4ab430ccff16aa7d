//! # Currency Conversion Seam
//!
//! The ledger never talks to the network. It converts through this trait,
//! which `skil-rates::RateCache` implements.
//!
//! ## Direction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rate = ISK per 1 unit of foreign currency   (1 EUR = 150 ISK)          │
//! │                                                                         │
//! │  ISK ──► foreign :   amount / rate          150 ISK / 150 = 1 EUR      │
//! │                                                                         │
//! │  Conversion only ever runs FROM the local currency.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use crate::currency::Currency;
use crate::display::DisplayAmount;
use crate::error::{ConversionFailure, RateUnavailable};
use crate::money::Money;

/// Converts local-currency amounts into a display currency.
///
/// Methods take `&mut self` because implementations keep a rate cache that
/// is refreshed on lookup.
#[async_trait]
pub trait CurrencyConverter: Send {
    /// ISK per 1 unit of `currency`. Exactly `1.0` for the local currency.
    async fn rate(&mut self, currency: Currency) -> Result<f64, RateUnavailable>;

    /// `amount` expressed in `target`.
    async fn convert(&mut self, amount: Money, target: Currency) -> Result<f64, RateUnavailable>;
}

/// Renders a local amount in `currency`, going through `converter` only
/// when a real conversion is needed.
///
/// Zero and local-currency amounts are returned without touching the
/// converter, so an empty till never triggers a rate fetch.
pub async fn convert_for_display<C>(
    amount: Money,
    currency: Currency,
    converter: &mut C,
) -> Result<DisplayAmount, ConversionFailure>
where
    C: CurrencyConverter + ?Sized,
{
    if currency.is_local() {
        return Ok(DisplayAmount::Exact(amount));
    }
    if amount.is_zero() {
        return Ok(DisplayAmount::Converted {
            amount: 0.0,
            currency,
        });
    }

    converter
        .convert(amount, currency)
        .await
        .map(|converted| DisplayAmount::Converted {
            amount: converted,
            currency,
        })
        .map_err(|source| ConversionFailure {
            amount,
            target: currency,
            source,
        })
}


#[cfg(test)]
mod tests {
    use super::testing::FixedRate;
    use super::*;

    #[tokio::test]
    async fn test_local_amount_is_exact() {
        let mut converter = FixedRate::new(150.0);
        let shown = convert_for_display(Money::from_units(110), Currency::Isk, &mut converter)
            .await
            .unwrap();
        assert_eq!(shown, DisplayAmount::Exact(Money::from_units(110)));
        assert_eq!(converter.calls, 0);
    }

    #[tokio::test]
    async fn test_zero_skips_converter() {
        let mut converter = FixedRate::failing();
        let shown = convert_for_display(Money::zero(), Currency::Eur, &mut converter)
            .await
            .unwrap();
        assert_eq!(shown.to_string(), "0 EUR");
        assert_eq!(converter.calls, 0);
    }

    #[tokio::test]
    async fn test_foreign_amount_divides_by_rate() {
        let mut converter = FixedRate::new(150.0);
        let shown = convert_for_display(Money::from_units(150), Currency::Eur, &mut converter)
            .await
            .unwrap();
        assert_eq!(
            shown,
            DisplayAmount::Converted {
                amount: 1.0,
                currency: Currency::Eur
            }
        );
        assert_eq!(converter.calls, 1);
    }

    #[tokio::test]
    async fn test_failure_carries_local_amount() {
        let mut converter = FixedRate::failing();
        let err = convert_for_display(Money::from_units(45), Currency::Usd, &mut converter)
            .await
            .unwrap_err();
        assert_eq!(err.amount, Money::from_units(45));
        assert_eq!(err.target, Currency::Usd);
    }
}
