//! # Money Module
//!
//! Provides the `Money` type for local-currency amounts.
//!
//! ## Why Whole Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE LOCAL CURRENCY HAS NO MINOR UNIT                                   │
//! │                                                                         │
//! │  Deposits are priced in whole krónur:                                   │
//! │    can    = 20                                                          │
//! │    bottle = 25                                                          │
//! │                                                                         │
//! │  Every local amount is an exact integer. Floating point only appears    │
//! │  after conversion to a foreign display currency, and never flows back.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use skil_core::money::Money;
//!
//! let can = Money::from_units(20);
//! let cans = can.multiply_quantity(3);
//! assert_eq!((cans + Money::from_units(50)).units(), 110);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A local-currency amount in whole units.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the arithmetic type used everywhere else and
///   leaves room for corrections, even though the ledger itself never goes
///   below zero
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole local-currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the amount in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a count.
    ///
    /// ## Example
    /// ```rust
    /// use skil_core::money::Money;
    ///
    /// let bottle = Money::from_units(25);
    /// assert_eq!(bottle.multiply_quantity(4).units(), 100);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// The amount as a float, for division by an exchange rate.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the bare amount. The currency code is added by
/// [`DisplayAmount`](crate::display::DisplayAmount).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(110);
        assert_eq!(money.units(), 110);
        assert!(!money.is_zero());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_display_is_bare_integer() {
        assert_eq!(Money::from_units(110).to_string(), "110");
        assert_eq!(Money::zero().to_string(), "0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(60);
        let b = Money::from_units(50);
        assert_eq!((a + b).units(), 110);

        let mut c = a;
        c += b;
        assert_eq!(c.units(), 110);

        assert_eq!(Money::from_units(20).multiply_quantity(3).units(), 60);
    }
}
