//! # skil-core: Pure Business Logic for Skil POS
//!
//! This crate is the **heart** of the deposit-return counter. It holds the
//! settlement ledger and everything it is priced with, as pure code with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Skil POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal Till (apps/till)                    │   │
//! │  │    cans ──► bottles ──► currency ──► pay / clear               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ skil-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ledger   │  │   money   │  │  display  │  │ validation│  │   │
//! │  │   │  Deposit  │  │   Money   │  │  Amount   │  │   counts  │  │   │
//! │  │   │  Ledger   │  │ Currency  │  │ rate line │  │   flags   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • CONVERSION ONLY THROUGH A TRAIT         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │  CurrencyConverter                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 skil-rates (RateCache)                          │   │
//! │  │          24h exchange-rate cache over a remote API              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ledger`] - The deposit accumulator and settlement state machine
//! - [`money`] - Whole-unit local money
//! - [`currency`] - The supported display currencies
//! - [`convert`] - The `CurrencyConverter` seam implemented by the rate cache
//! - [`display`] - Rendering amounts and exchange-rate lines
//! - [`validation`] - Count input validation at the till boundary
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use skil_core::DepositLedger;
//!
//! let mut ledger = DepositLedger::new();
//! ledger.set_can_count(3);
//! ledger.set_bottle_count(2);
//!
//! // 3 × 20 + 2 × 25
//! assert_eq!(ledger.total_local_value().units(), 110);
//!
//! let settlement = ledger.settle_and_reset();
//! assert_eq!(settlement.count, 5);
//! assert_eq!(ledger.total_count(), 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod convert;
pub mod currency;
pub mod display;
pub mod error;
pub mod ledger;
pub mod money;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use convert::{convert_for_display, CurrencyConverter};
pub use currency::Currency;
pub use display::{format_amount, rate_line, DisplayAmount};
pub use error::{ConversionFailure, RateUnavailable, UnavailableReason, ValidationError};
pub use ledger::{DepositLedger, Settlement};
pub use money::Money;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Deposit paid per returned can, in local currency.
pub const CAN_UNIT_VALUE: Money = Money::from_units(20);

/// Deposit paid per returned bottle, in local currency.
pub const BOTTLE_UNIT_VALUE: Money = Money::from_units(25);
