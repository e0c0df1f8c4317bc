use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Money is represented as an exact decimal so cent values never drift.
pub type Amount = Decimal;

/// Largest magnitude accepted from user input, in whole units. Far below
/// `Decimal::MAX`, so totals over any realistic number of expenses fit.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// Format an amount with two decimal places.
/// Example: 12.5 -> "12.50", -3 -> "-3.00"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a plain decimal string into an amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, "-3" -> -3
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    let amount = Decimal::from_str(input).map_err(|_| ParseAmountError::InvalidFormat)?;
    if amount.abs() > Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(ParseAmountError::OutOfRange);
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    OutOfRange,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::OutOfRange => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
