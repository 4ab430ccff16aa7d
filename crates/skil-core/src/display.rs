//! # Display Formatting
//!
//! Turns amounts into the strings the till shows.
//!
//! ## Rules
//! - Local amounts are exact integers: `110 ISK`
//! - Converted amounts round to at most two decimals (half to even) and
//!   drop trailing zeros: `0.73 EUR`, `1.5 USD`, `1 EUR`
//! - Zero is always shown, never omitted: `0 EUR`

use std::fmt;

use crate::currency::Currency;
use crate::money::Money;

/// An amount ready to be rendered next to its currency code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayAmount {
    /// An exact local-currency amount.
    Exact(Money),

    /// A local amount converted into a foreign currency.
    Converted { amount: f64, currency: Currency },
}

impl DisplayAmount {
    /// The currency this amount is shown in.
    pub fn currency(&self) -> Currency {
        match self {
            DisplayAmount::Exact(_) => Currency::LOCAL,
            DisplayAmount::Converted { currency, .. } => *currency,
        }
    }
}

impl fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayAmount::Exact(money) => write!(f, "{} {}", money, Currency::LOCAL),
            DisplayAmount::Converted { amount, currency } => {
                write!(f, "{} {}", format_amount(*amount), currency)
            }
        }
    }
}

/// Formats a converted amount with at most two decimals.
///
/// ## Example
/// ```rust
/// use skil_core::display::format_amount;
///
/// assert_eq!(format_amount(0.7333), "0.73");
/// assert_eq!(format_amount(1.5), "1.5");
/// assert_eq!(format_amount(150.0), "150");
/// ```
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round_ties_even() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }

    let fixed = format!("{:.2}", rounded);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// The exchange-rate line shown under the currency selector.
///
/// ## Example
/// ```rust
/// use skil_core::{display::rate_line, Currency};
///
/// assert_eq!(rate_line(Currency::Eur, 150.456), "1 EUR = 150.46 ISK");
/// ```
pub fn rate_line(currency: Currency, rate: f64) -> String {
    format!("1 {} = {} {}", currency, format_amount(rate), Currency::LOCAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(1.0), "1");
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(0.7333333), "0.73");
        assert_eq!(format_amount(1.5), "1.5");
        assert_eq!(format_amount(2.999), "3");
        assert_eq!(format_amount(0.001), "0");
    }

    #[test]
    fn test_format_amount_rounds_half_to_even() {
        assert_eq!(format_amount(0.125), "0.12");
        assert_eq!(format_amount(0.375), "0.38");
    }

    #[test]
    fn test_display_amount() {
        assert_eq!(DisplayAmount::Exact(Money::from_units(110)).to_string(), "110 ISK");
        assert_eq!(DisplayAmount::Exact(Money::zero()).to_string(), "0 ISK");

        let converted = DisplayAmount::Converted {
            amount: 110.0 / 150.0,
            currency: Currency::Eur,
        };
        assert_eq!(converted.to_string(), "0.73 EUR");
        assert_eq!(converted.currency(), Currency::Eur);
    }

    #[test]
    fn test_rate_line() {
        assert_eq!(rate_line(Currency::Usd, 138.0), "1 USD = 138 ISK");
        assert_eq!(rate_line(Currency::Eur, 150.5), "1 EUR = 150.5 ISK");
    }
}
