//! # Deposit Ledger
//!
//! The accumulator behind one till session: what is being counted right now,
//! and what has been paid out so far.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Counting (the only state)                            │
//! │                                                                         │
//! │   set_can_count(3)      cans = 3      ──► 3 × 20 =  60                 │
//! │   set_bottle_count(2)   bottles = 2   ──► 2 × 25 =  50                 │
//! │                                           total  = 110                  │
//! │         │                                                               │
//! │         │  pay                                                          │
//! │         ▼                                                               │
//! │   settle(carry)  ──► carry + (5 items, 110)                             │
//! │   reset()        ──► cans = 0, bottles = 0    (carry untouched)         │
//! │         │                                                               │
//! │         │  clear                                                        │
//! │         ▼                                                               │
//! │   reset()        ──► cans = 0, bottles = 0    (carry untouched)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Local-currency values are never stored. They are computed from the counts
//! on every read, so they cannot drift from them.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::convert::{convert_for_display, CurrencyConverter};
use crate::currency::Currency;
use crate::display::DisplayAmount;
use crate::error::ConversionFailure;
use crate::money::Money;
use crate::{BOTTLE_UNIT_VALUE, CAN_UNIT_VALUE};

/// Running payout totals produced by a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settlement {
    /// Items paid out for, across settlements.
    pub count: u64,

    /// Local currency paid out, across settlements.
    pub local_value: Money,
}

/// Counts and payout carry for one till session.
///
/// ## Invariants
/// - Counts are non-negative (enforced by `u32`)
/// - Local values are always `count × unit value`
/// - `reset()` never touches the payout carry
/// - Changing the display currency never touches counts or carry
#[derive(Debug, Clone)]
pub struct DepositLedger {
    session_id: Uuid,
    opened_at: DateTime<Utc>,
    can_count: u32,
    bottle_count: u32,
    display_currency: Currency,
    payout_carry_count: u64,
    payout_carry_local: Money,
}

impl DepositLedger {
    /// Opens a new session with everything zeroed and the local currency
    /// selected.
    pub fn new() -> Self {
        DepositLedger {
            session_id: Uuid::new_v4(),
            opened_at: Utc::now(),
            can_count: 0,
            bottle_count: 0,
            display_currency: Currency::LOCAL,
            payout_carry_count: 0,
            payout_carry_local: Money::zero(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    // =========================================================================
    // Counts
    // =========================================================================

    /// Replaces the can count for the current cycle.
    pub fn set_can_count(&mut self, count: u32) {
        self.can_count = count;
    }

    /// Replaces the bottle count for the current cycle.
    pub fn set_bottle_count(&mut self, count: u32) {
        self.bottle_count = count;
    }

    pub fn can_count(&self) -> u32 {
        self.can_count
    }

    pub fn bottle_count(&self) -> u32 {
        self.bottle_count
    }

    /// Cans and bottles together.
    pub fn total_count(&self) -> u64 {
        self.can_count as u64 + self.bottle_count as u64
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    pub fn local_value_of_cans(&self) -> Money {
        CAN_UNIT_VALUE.multiply_quantity(self.can_count)
    }

    pub fn local_value_of_bottles(&self) -> Money {
        BOTTLE_UNIT_VALUE.multiply_quantity(self.bottle_count)
    }

    pub fn total_local_value(&self) -> Money {
        self.local_value_of_cans() + self.local_value_of_bottles()
    }

    // =========================================================================
    // Display Currency
    // =========================================================================

    /// Selects the currency amounts are rendered in.
    ///
    /// Nothing is recomputed here. Callers read the derived values again.
    pub fn set_display_currency(&mut self, currency: Currency) {
        self.display_currency = currency;
    }

    pub fn display_currency(&self) -> Currency {
        self.display_currency
    }

    /// The current total in the display currency.
    ///
    /// Local currency yields the exact integer total. A foreign currency goes
    /// through `converter`; on failure the error is returned as is, with the
    /// local total attached, and no value is substituted.
    pub async fn value_in_display_currency<C>(
        &self,
        converter: &mut C,
    ) -> Result<DisplayAmount, ConversionFailure>
    where
        C: CurrencyConverter + ?Sized,
    {
        convert_for_display(self.total_local_value(), self.display_currency, converter).await
    }

    /// The payout carry in the display currency.
    pub async fn payout_in_display_currency<C>(
        &self,
        converter: &mut C,
    ) -> Result<DisplayAmount, ConversionFailure>
    where
        C: CurrencyConverter + ?Sized,
    {
        convert_for_display(self.payout_carry_local, self.display_currency, converter).await
    }

    // =========================================================================
    // Settlement
    // =========================================================================

    /// Folds the current counts into prior running totals.
    ///
    /// Pure: the carry is not updated. Call before [`reset`](Self::reset),
    /// which zeroes the counts read here.
    pub fn settle(&self, prior_count: u64, prior_local_value: Money) -> Settlement {
        Settlement {
            count: prior_count + self.total_count(),
            local_value: prior_local_value + self.total_local_value(),
        }
    }

    /// Settles into the ledger's own carry, then clears the counters.
    ///
    /// Returns the new carry.
    pub fn settle_and_reset(&mut self) -> Settlement {
        let settlement = self.settle(self.payout_carry_count, self.payout_carry_local);
        self.payout_carry_count = settlement.count;
        self.payout_carry_local = settlement.local_value;
        self.reset();
        settlement
    }

    /// Clears the current counts. The payout carry is kept.
    pub fn reset(&mut self) {
        self.can_count = 0;
        self.bottle_count = 0;
    }

    // =========================================================================
    // Payout Carry
    // =========================================================================

    pub fn payout_carry_count(&self) -> u64 {
        self.payout_carry_count
    }

    pub fn payout_carry_local(&self) -> Money {
        self.payout_carry_local
    }

    /// The carry as a [`Settlement`].
    pub fn payout_carry(&self) -> Settlement {
        Settlement {
            count: self.payout_carry_count,
            local_value: self.payout_carry_local,
        }
    }

    /// Stores totals returned by [`settle`](Self::settle).
    pub fn set_payout_carry(&mut self, settlement: Settlement) {
        self.payout_carry_count = settlement.count;
        self.payout_carry_local = settlement.local_value;
    }

    /// Starts a fresh payout run.
    pub fn clear_payout_carry(&mut self) {
        self.payout_carry_count = 0;
        self.payout_carry_local = Money::zero();
    }
}

impl Default for DepositLedger {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::testing::FixedRate;

    #[test]
    fn test_new_ledger_is_zeroed() {
        let ledger = DepositLedger::new();
        assert_eq!(ledger.total_count(), 0);
        assert_eq!(ledger.total_local_value(), Money::zero());
        assert_eq!(ledger.payout_carry(), Settlement::default());
        assert_eq!(ledger.display_currency(), Currency::Isk);
    }

    #[test]
    fn test_totals_follow_counts() {
        let mut ledger = DepositLedger::new();
        let cases = [
            (0u32, 0u32),
            (1, 0),
            (0, 1),
            (7, 13),
            (100_000, 250_000),
            (u32::MAX, u32::MAX),
        ];
        for (cans, bottles) in cases {
            ledger.set_can_count(cans);
            ledger.set_bottle_count(bottles);
            assert_eq!(ledger.total_count(), cans as u64 + bottles as u64);
            assert_eq!(
                ledger.total_local_value().units(),
                20 * cans as i64 + 25 * bottles as i64
            );
        }
    }

    #[test]
    fn test_counts_are_independent() {
        let mut ledger = DepositLedger::new();
        ledger.set_can_count(4);
        assert_eq!(ledger.local_value_of_cans().units(), 80);
        assert_eq!(ledger.local_value_of_bottles().units(), 0);

        ledger.set_bottle_count(2);
        ledger.set_can_count(1);
        assert_eq!(ledger.local_value_of_cans().units(), 20);
        assert_eq!(ledger.local_value_of_bottles().units(), 50);
    }

    #[test]
    fn test_settle_then_reset() {
        let mut ledger = DepositLedger::new();
        ledger.set_can_count(3);
        ledger.set_bottle_count(2);
        assert_eq!(ledger.total_local_value().units(), 110);

        let settlement = ledger.settle(0, Money::zero());
        assert_eq!(settlement.count, 5);
        assert_eq!(settlement.local_value.units(), 110);

        // settle() alone leaves the carry for the caller to store
        assert_eq!(ledger.payout_carry(), Settlement::default());

        ledger.reset();
        assert_eq!((ledger.can_count(), ledger.bottle_count()), (0, 0));
        assert_eq!(settlement.count, 5);
        assert_eq!(settlement.local_value.units(), 110);
    }

    #[test]
    fn test_reset_keeps_payout_carry() {
        let mut ledger = DepositLedger::new();
        ledger.set_payout_carry(Settlement {
            count: 12,
            local_value: Money::from_units(270),
        });
        ledger.set_can_count(5);
        ledger.set_bottle_count(3);

        ledger.reset();

        assert_eq!(ledger.can_count(), 0);
        assert_eq!(ledger.bottle_count(), 0);
        assert_eq!(ledger.payout_carry_count(), 12);
        assert_eq!(ledger.payout_carry_local().units(), 270);
    }

    #[test]
    fn test_settle_and_reset_accumulates() {
        let mut ledger = DepositLedger::new();

        ledger.set_can_count(3);
        ledger.set_bottle_count(2);
        let first = ledger.settle_and_reset();
        assert_eq!(first.count, 5);
        assert_eq!(first.local_value.units(), 110);
        assert_eq!(ledger.total_count(), 0);

        ledger.set_bottle_count(4);
        let second = ledger.settle_and_reset();
        assert_eq!(second.count, 9);
        assert_eq!(second.local_value.units(), 210);
        assert_eq!(ledger.payout_carry(), second);
    }

    #[test]
    fn test_settle_with_nothing_counted() {
        let mut ledger = DepositLedger::new();
        let settlement = ledger.settle_and_reset();
        assert_eq!(settlement, Settlement::default());
    }

    #[test]
    fn test_clear_payout_carry() {
        let mut ledger = DepositLedger::new();
        ledger.set_can_count(10);
        ledger.settle_and_reset();
        assert_eq!(ledger.payout_carry_local().units(), 200);

        ledger.clear_payout_carry();
        assert_eq!(ledger.payout_carry(), Settlement::default());
    }

    #[test]
    fn test_display_currency_does_not_touch_counts() {
        let mut ledger = DepositLedger::new();
        ledger.set_can_count(2);
        ledger.set_payout_carry(Settlement {
            count: 1,
            local_value: Money::from_units(25),
        });

        ledger.set_display_currency(Currency::Usd);

        assert_eq!(ledger.display_currency(), Currency::Usd);
        assert_eq!(ledger.can_count(), 2);
        assert_eq!(ledger.total_local_value().units(), 40);
        assert_eq!(ledger.payout_carry_local().units(), 25);
    }

    #[tokio::test]
    async fn test_value_in_local_currency_is_exact() {
        let mut ledger = DepositLedger::new();
        ledger.set_can_count(3);
        ledger.set_bottle_count(2);

        let mut converter = FixedRate::failing();
        let value = ledger.value_in_display_currency(&mut converter).await.unwrap();
        assert_eq!(value, DisplayAmount::Exact(Money::from_units(110)));
        assert_eq!(converter.calls, 0);
    }

    #[tokio::test]
    async fn test_value_in_foreign_currency() {
        let mut ledger = DepositLedger::new();
        ledger.set_bottle_count(6);
        ledger.set_display_currency(Currency::Eur);

        let mut converter = FixedRate::new(150.0);
        let value = ledger.value_in_display_currency(&mut converter).await.unwrap();
        assert_eq!(value.to_string(), "1 EUR");
        assert_eq!(converter.calls, 1);
    }

    #[tokio::test]
    async fn test_empty_foreign_total_skips_conversion() {
        let mut ledger = DepositLedger::new();
        ledger.set_display_currency(Currency::Eur);

        let mut converter = FixedRate::failing();
        let value = ledger.value_in_display_currency(&mut converter).await.unwrap();
        assert_eq!(value.to_string(), "0 EUR");
        assert_eq!(converter.calls, 0);
    }

    #[tokio::test]
    async fn test_failed_conversion_leaves_ledger_unchanged() {
        let mut ledger = DepositLedger::new();
        ledger.set_can_count(3);
        ledger.set_display_currency(Currency::Usd);
        ledger.settle_and_reset();
        ledger.set_bottle_count(1);
        let before = (ledger.can_count(), ledger.bottle_count(), ledger.payout_carry());

        let mut converter = FixedRate::failing();
        let err = ledger.value_in_display_currency(&mut converter).await.unwrap_err();
        assert_eq!(err.amount.units(), 25);
        assert_eq!(err.target, Currency::Usd);

        let err = ledger.payout_in_display_currency(&mut converter).await.unwrap_err();
        assert_eq!(err.amount.units(), 60);

        let after = (ledger.can_count(), ledger.bottle_count(), ledger.payout_carry());
        assert_eq!(before, after);
    }
}
