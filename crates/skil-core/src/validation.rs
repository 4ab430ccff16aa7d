//! # Validation Module
//!
//! Count input validation for the till boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: While typing                                                 │
//! │  └── classify_count_input() → Empty / Valid / Invalid field flag        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: On submit                                                    │
//! │  └── parse_count() → u32 or ValidationError                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: DepositLedger                                                │
//! │  └── Accepts u32 only. Negative counts are unrepresentable.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use skil_core::validation::{parse_count, classify_count_input, FieldValidity};
//!
//! assert_eq!(parse_count("cans", " 12 ").unwrap(), 12);
//! assert!(parse_count("cans", "-1").is_err());
//! assert_eq!(classify_count_input(""), FieldValidity::Empty);
//! ```

use crate::error::{ValidationError, ValidationResult};

/// Live validity of a count input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldValidity {
    /// Nothing typed yet. Shown neutral.
    #[default]
    Empty,

    /// A whole number of zero or more.
    Valid,

    /// Anything else.
    Invalid,
}

/// Parses a count typed into the `field` input.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be empty
/// - Must be a whole number (no decimals or exponents)
/// - Must not be negative
/// - Must fit in a `u32`
pub fn parse_count(field: &str, input: &str) -> ValidationResult<u32> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: i64 = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: u32::MAX as i64,
    })
}

/// Classifies partial input for live field feedback.
pub fn classify_count_input(input: &str) -> FieldValidity {
    if input.trim().is_empty() {
        return FieldValidity::Empty;
    }

    match parse_count("count", input) {
        Ok(_) => FieldValidity::Valid,
        Err(_) => FieldValidity::Invalid,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
