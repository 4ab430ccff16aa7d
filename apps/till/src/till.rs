//! # Till
//!
//! One counter terminal: a [`DepositLedger`] priced through a [`RateCache`],
//! plus the per-field state the view needs.
//!
//! ## Fallback Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Rendering an amount field                              │
//! │                                                                         │
//! │  local currency ─────────────────────────────► "110 ISK"               │
//! │  zero amount ────────────────────────────────► "0 EUR"                 │
//! │  foreign, rate available ────────────────────► "0.73 EUR"              │
//! │  foreign, rate unavailable ──► warn! ────────► "110 ISK"  error = true │
//! │                                                                         │
//! │  Applies to every amount: cans, bottles, total, payout.                │
//! │  Counts and carry are never touched by a failed conversion.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::fmt;
use tracing::{debug, info, warn};

use skil_core::validation::{classify_count_input, parse_count, FieldValidity};
use skil_core::{
    convert_for_display, rate_line, ConversionFailure, Currency, CurrencyConverter,
    DepositLedger, DisplayAmount, Money, RateUnavailable, Settlement, ValidationError,
};
use skil_rates::RateCache;

use crate::commands::{Command, HELP};

/// Shown instead of the exchange-rate line when no rate can be had.
pub const RATE_UNAVAILABLE: &str = "Exchange rate unavailable";

// =============================================================================
// View
// =============================================================================

/// A rendered value and whether it is a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldText {
    pub text: String,

    /// Set when the value could not be shown as asked.
    pub error: bool,
}

impl FieldText {
    fn ok(text: impl Into<String>) -> Self {
        FieldText {
            text: text.into(),
            error: false,
        }
    }

    fn flagged(text: impl Into<String>) -> Self {
        FieldText {
            text: text.into(),
            error: true,
        }
    }
}

impl fmt::Display for FieldText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error {
            write!(f, "{} (!)", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Everything the terminal prints after a command.
#[derive(Debug, Clone, PartialEq)]
pub struct TillView {
    pub till_name: String,
    pub currency: Currency,

    pub can_count: u32,
    pub cans_input: FieldValidity,
    pub cans_value: FieldText,

    pub bottle_count: u32,
    pub bottles_input: FieldValidity,
    pub bottles_value: FieldText,

    pub total_count: u64,
    pub total_value: FieldText,

    pub payout_count: u64,
    pub payout_value: FieldText,

    /// `1 EUR = 150 ISK`, empty for the local currency.
    pub rate_line: FieldText,
}

impl TillView {
    /// True if any amount fell back to the local currency.
    pub fn has_conversion_error(&self) -> bool {
        [
            &self.cans_value,
            &self.bottles_value,
            &self.total_value,
            &self.payout_value,
            &self.rate_line,
        ]
        .iter()
        .any(|field| field.error)
    }
}

fn input_marker(validity: FieldValidity) -> &'static str {
    match validity {
        FieldValidity::Invalid => "  <- invalid input",
        FieldValidity::Empty | FieldValidity::Valid => "",
    }
}

impl fmt::Display for TillView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "── {} ── [{}]", self.till_name, self.currency)?;
        writeln!(
            f,
            "  Cans     {:>6}   {}{}",
            self.can_count,
            self.cans_value,
            input_marker(self.cans_input)
        )?;
        writeln!(
            f,
            "  Bottles  {:>6}   {}{}",
            self.bottle_count,
            self.bottles_value,
            input_marker(self.bottles_input)
        )?;
        writeln!(f, "  Total    {:>6}   {}", self.total_count, self.total_value)?;
        writeln!(f, "  Payout   {:>6}   {}", self.payout_count, self.payout_value)?;
        if !self.rate_line.text.is_empty() {
            writeln!(f, "  {}", self.rate_line)?;
        }
        if self.has_conversion_error() {
            writeln!(f, "  (!) shown in {}: {}", Currency::LOCAL, RATE_UNAVAILABLE)?;
        }
        Ok(())
    }
}

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Print this and read the next line.
    Print(String),
    Quit,
}

// =============================================================================
// Till
// =============================================================================

/// A counter terminal session.
pub struct Till {
    name: String,
    ledger: DepositLedger,
    rates: RateCache,
    cans_input: FieldValidity,
    bottles_input: FieldValidity,
}

impl Till {
    pub fn new(name: impl Into<String>, rates: RateCache, currency: Currency) -> Self {
        let mut ledger = DepositLedger::new();
        ledger.set_display_currency(currency);

        let name = name.into();
        info!(
            till = %name,
            session_id = %ledger.session_id(),
            currency = %currency,
            "Till session opened"
        );

        Till {
            name,
            ledger,
            rates,
            cans_input: FieldValidity::Empty,
            bottles_input: FieldValidity::Empty,
        }
    }

    pub fn ledger(&self) -> &DepositLedger {
        &self.ledger
    }

    pub fn rates(&self) -> &RateCache {
        &self.rates
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Sets the can count from raw input.
    ///
    /// Invalid input flags the cans field and leaves the count as it was.
    pub fn enter_cans(&mut self, input: &str) -> Result<u32, ValidationError> {
        self.cans_input = classify_count_input(input);
        let count = parse_count("cans", input).inspect_err(|e| {
            warn!(input = %input, error = %e, "Rejected can count");
        })?;
        self.ledger.set_can_count(count);
        Ok(count)
    }

    /// Sets the bottle count from raw input.
    ///
    /// Invalid input flags the bottles field and leaves the count as it was.
    pub fn enter_bottles(&mut self, input: &str) -> Result<u32, ValidationError> {
        self.bottles_input = classify_count_input(input);
        let count = parse_count("bottles", input).inspect_err(|e| {
            warn!(input = %input, error = %e, "Rejected bottle count");
        })?;
        self.ledger.set_bottle_count(count);
        Ok(count)
    }

    /// Switches the display currency. Unknown codes leave it unchanged.
    pub fn select_currency(&mut self, input: &str) -> Result<Currency, ValidationError> {
        let currency = input.parse::<Currency>().inspect_err(|e| {
            warn!(input = %input, error = %e, "Rejected currency");
        })?;
        self.ledger.set_display_currency(currency);
        debug!(currency = %currency, "Display currency changed");
        Ok(currency)
    }

    // =========================================================================
    // Settlement
    // =========================================================================

    /// Pays out the current count and starts a new one.
    pub fn pay(&mut self) -> Settlement {
        let paid_count = self.ledger.total_count();
        let paid_value = self.ledger.total_local_value();
        let carry = self.ledger.settle_and_reset();
        self.clear_inputs();

        info!(
            session_id = %self.ledger.session_id(),
            items = paid_count,
            value = %paid_value,
            payout_count = carry.count,
            payout_value = %carry.local_value,
            "Deposit paid out"
        );
        carry
    }

    /// Zeroes the current count without paying.
    pub fn clear(&mut self) {
        self.ledger.reset();
        self.clear_inputs();
        debug!("Counts cleared");
    }

    /// Starts a new payout run.
    pub fn reset_payout(&mut self) {
        self.ledger.clear_payout_carry();
        info!(session_id = %self.ledger.session_id(), "Payout reset");
    }

    /// Forgets every cached exchange rate.
    pub fn refresh_rates(&mut self) {
        self.rates.clear_cache();
    }

    fn clear_inputs(&mut self) {
        self.cans_input = FieldValidity::Empty;
        self.bottles_input = FieldValidity::Empty;
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Looks up the display currency's rate. `None` for the local currency.
    async fn lookup_rate(&mut self) -> Option<Result<f64, RateUnavailable>> {
        let currency = self.ledger.display_currency();
        if currency.is_local() {
            return None;
        }
        Some(self.rates.get_rate(currency).await)
    }

    /// The exchange-rate line for the display currency.
    pub async fn rate_line(&mut self) -> FieldText {
        let lookup = self.lookup_rate().await;
        rate_field(self.ledger.display_currency(), lookup.as_ref())
    }

    /// Renders the whole view.
    ///
    /// The rate is looked up once. If that fails, every amount falls back
    /// without asking the source again.
    pub async fn render(&mut self) -> TillView {
        let currency = self.ledger.display_currency();
        let lookup = self.lookup_rate().await;

        let amounts = match &lookup {
            Some(Err(outage)) => {
                render_amounts(&self.ledger, &mut KnownOutage(outage.clone())).await
            }
            None | Some(Ok(_)) => render_amounts(&self.ledger, &mut self.rates).await,
        };

        TillView {
            till_name: self.name.clone(),
            currency,
            can_count: self.ledger.can_count(),
            cans_input: self.cans_input,
            cans_value: amounts.cans,
            bottle_count: self.ledger.bottle_count(),
            bottles_input: self.bottles_input,
            bottles_value: amounts.bottles,
            total_count: self.ledger.total_count(),
            total_value: amounts.total,
            payout_count: self.ledger.payout_carry_count(),
            payout_value: amounts.payout,
            rate_line: rate_field(currency, lookup.as_ref()),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Runs one command and returns what to print.
    pub async fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Cans(input) => {
                if let Err(e) = self.enter_cans(&input) {
                    return self.view_with_notice(e.to_string()).await;
                }
            }
            Command::Bottles(input) => {
                if let Err(e) = self.enter_bottles(&input) {
                    return self.view_with_notice(e.to_string()).await;
                }
            }
            Command::Currency(input) => {
                if let Err(e) = self.select_currency(&input) {
                    return self.view_with_notice(e.to_string()).await;
                }
            }
            Command::Pay => {
                let carry = self.pay();
                let paid = format!(
                    "Paid. Payout so far: {} items, {} {}",
                    carry.count,
                    carry.local_value,
                    Currency::LOCAL
                );
                return self.view_with_notice(paid).await;
            }
            Command::Clear => self.clear(),
            Command::Rate => {
                let line = self.rate_line().await;
                return Reply::Print(if line.text.is_empty() {
                    format!("{} is the local currency", Currency::LOCAL)
                } else {
                    line.to_string()
                });
            }
            Command::Refresh => {
                self.refresh_rates();
                return Reply::Print("Exchange rates will be fetched again".to_string());
            }
            Command::PayoutReset => self.reset_payout(),
            Command::Show => {}
            Command::Help => return Reply::Print(HELP.to_string()),
            Command::Quit => return Reply::Quit,
        }

        Reply::Print(self.render().await.to_string())
    }

    async fn view_with_notice(&mut self, notice: String) -> Reply {
        Reply::Print(format!("{}\n{}", notice, self.render().await))
    }
}

/// Converter standing in for the cache once a lookup has already failed.
struct KnownOutage(RateUnavailable);

#[async_trait]
impl CurrencyConverter for KnownOutage {
    async fn rate(&mut self, _currency: Currency) -> Result<f64, RateUnavailable> {
        Err(self.0.clone())
    }

    async fn convert(
        &mut self,
        _amount: Money,
        _target: Currency,
    ) -> Result<f64, RateUnavailable> {
        Err(self.0.clone())
    }
}

struct Amounts {
    cans: FieldText,
    bottles: FieldText,
    total: FieldText,
    payout: FieldText,
}

async fn render_amounts<C>(ledger: &DepositLedger, converter: &mut C) -> Amounts
where
    C: CurrencyConverter + ?Sized,
{
    let currency = ledger.display_currency();
    let cans = convert_for_display(ledger.local_value_of_cans(), currency, converter).await;
    let bottles = convert_for_display(ledger.local_value_of_bottles(), currency, converter).await;
    let total = ledger.value_in_display_currency(converter).await;
    let payout = ledger.payout_in_display_currency(converter).await;

    Amounts {
        cans: amount_field("cans", cans),
        bottles: amount_field("bottles", bottles),
        total: amount_field("total", total),
        payout: amount_field("payout", payout),
    }
}

fn rate_field(currency: Currency, lookup: Option<&Result<f64, RateUnavailable>>) -> FieldText {
    match lookup {
        None => FieldText::default(),
        Some(Ok(rate)) => FieldText::ok(rate_line(currency, *rate)),
        Some(Err(e)) => {
            warn!(error = %e, "Showing rate line fallback");
            FieldText::flagged(RATE_UNAVAILABLE)
        }
    }
}

/// Amount text for a field, falling back to the exact local amount.
fn amount_field(field: &'static str, shown: Result<DisplayAmount, ConversionFailure>) -> FieldText {
    match shown {
        Ok(amount) => FieldText::ok(amount.to_string()),
        Err(failure) => {
            warn!(field, error = %failure, "Showing local amount");
            FieldText::flagged(local_text(failure.amount))
        }
    }
}

fn local_text(amount: Money) -> String {
    DisplayAmount::Exact(amount).to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
