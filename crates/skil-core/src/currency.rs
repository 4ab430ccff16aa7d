//! # Currency
//!
//! The fixed set of currencies the till can display amounts in.
//!
//! ISK is the local currency: every deposit is priced in it and every
//! exchange rate is expressed as "ISK per 1 unit of the foreign currency".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A supported display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Icelandic króna, the local pricing currency.
    #[default]
    Isk,

    /// Euro.
    Eur,

    /// US dollar.
    Usd,
}

impl Currency {
    /// The local currency.
    pub const LOCAL: Currency = Currency::Isk;

    /// Every selectable currency, local first.
    pub const ALL: [Currency; 3] = [Currency::Isk, Currency::Eur, Currency::Usd];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Isk => "ISK",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    /// Returns true for the local pricing currency.
    pub const fn is_local(&self) -> bool {
        matches!(self, Currency::Isk)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ISK" => Ok(Currency::Isk),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            _ => Err(ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            }),
        }
    }
}
