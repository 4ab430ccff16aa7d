//! # Till Commands
//!
//! One command per input line. Keywords are case-insensitive, arguments are
//! passed through untouched so the till can validate them and flag the
//! matching field.
//!
//! ```text
//! cans 3            bottles 2          currency eur
//! pay               clear              rate
//! refresh           payout-reset       show
//! help              quit
//! ```

use std::str::FromStr;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the can count with the raw argument.
    Cans(String),

    /// Replace the bottle count with the raw argument.
    Bottles(String),

    /// Settle the current counts into the payout.
    Pay,

    /// Zero the counts without paying.
    Clear,

    /// Switch the display currency.
    Currency(String),

    /// Show the exchange-rate line for the display currency.
    Rate,

    /// Drop every cached exchange rate.
    Refresh,

    /// Start a new payout run.
    PayoutReset,

    Show,
    Help,
    Quit,
}

/// Why a line could not be read as a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command: {0}. Type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs a value, e.g. '{0} 3'")]
    MissingArgument(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, argument) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let needs_argument = |name: &'static str| {
            if argument.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(argument.to_string())
            }
        };

        match keyword.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "cans" => needs_argument("cans").map(Command::Cans),
            "bottles" => needs_argument("bottles").map(Command::Bottles),
            "currency" => needs_argument("currency").map(Command::Currency),
            "pay" => Ok(Command::Pay),
            "clear" => Ok(Command::Clear),
            "rate" => Ok(Command::Rate),
            "refresh" => Ok(Command::Refresh),
            "payout-reset" => Ok(Command::PayoutReset),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(keyword.to_string())),
        }
    }
}

/// Text printed for `help`.
pub const HELP: &str = "\
Commands:
  cans <n>          set the number of cans
  bottles <n>       set the number of bottles
  pay               pay out the current count and start a new one
  clear             zero the current count without paying
  currency <code>   show amounts in ISK, EUR or USD
  rate              show the exchange rate for the current currency
  refresh           fetch fresh exchange rates on next use
  payout-reset      start a new payout run
  show              print the current state
  help              this text
  quit              leave the till";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("cans 3".parse::<Command>(), Ok(Command::Cans("3".into())));
        assert_eq!("  BOTTLES   12 ".parse::<Command>(), Ok(Command::Bottles("12".into())));
        assert_eq!("currency eur".parse::<Command>(), Ok(Command::Currency("eur".into())));
        assert_eq!("Pay".parse::<Command>(), Ok(Command::Pay));
        assert_eq!("payout-reset".parse::<Command>(), Ok(Command::PayoutReset));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_argument_is_kept_raw() {
        // The till validates this and flags the field
        assert_eq!("cans -4".parse::<Command>(), Ok(Command::Cans("-4".into())));
        assert_eq!("cans 1.5".parse::<Command>(), Ok(Command::Cans("1.5".into())));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("cans".parse::<Command>(), Err(CommandError::MissingArgument("cans")));
        assert_eq!(
            "refund 3".parse::<Command>(),
            Err(CommandError::Unknown("refund".into()))
        );
    }
}
