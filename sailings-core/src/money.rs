//! Currency amounts held as integer cents.
//!
//! Prices arrive as display strings such as `"$675"` or `"$1,250.50"`. They are
//! parsed once at the boundary and formatted again only for output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

const CURRENCY_SYMBOL: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Parse a display amount. Accepts an optional leading `$`, thousands
    /// separators and up to two decimal places.
    pub fn parse(s: &str) -> ScheduleResult<Self> {
        let err = || ScheduleError::MoneyParse(s.to_string());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix(CURRENCY_SYMBOL).unwrap_or(rest).trim();
        let digits: String = rest.chars().filter(|c| *c != ',').collect();

        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits.as_str(), ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }

        let whole: i64 = whole.parse().map_err(|_| err())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| err())? * 10,
            _ => fraction.parse().map_err(|_| err())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(err)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl FromStr for Money {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl fmt::Display for Money {
    /// `$1,250` for whole amounts, `$1,250.50` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = group_thousands(abs / 100);
        let cents = abs % 100;

        if cents == 0 {
            write!(f, "{sign}{CURRENCY_SYMBOL}{whole}")
        } else {
            write!(f, "{sign}{CURRENCY_SYMBOL}{whole}.{cents:02}")
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_symbol_amounts() {
        assert_eq!(Money::parse("$675").unwrap(), Money::from_dollars(675));
        assert_eq!(Money::parse("675").unwrap(), Money::from_dollars(675));
        assert_eq!(Money::parse(" $ 340 ").unwrap(), Money::from_dollars(340));
    }

    #[test]
    fn test_parse_separators_and_cents() {
        assert_eq!(Money::parse("$1,250.50").unwrap(), Money::from_cents(125_050));
        assert_eq!(Money::parse("$12.5").unwrap(), Money::from_cents(1_250));
        assert_eq!(Money::parse("-$20").unwrap(), Money::from_cents(-2_000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "$", "abc", "$6.755", "$6..7", "€675", "$1.2.3"] {
            assert!(Money::parse(bad).is_err(), "'{bad}' should not parse");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_dollars(675).to_string(), "$675");
        assert_eq!(Money::from_cents(125_050).to_string(), "$1,250.50");
        assert_eq!(Money::from_dollars(1_000_000).to_string(), "$1,000,000");
        assert_eq!(Money::from_cents(-505).to_string(), "-$5.05");
        assert_eq!(Money::default().to_string(), "$0");
    }

    #[test]
    fn test_differently_formatted_amounts_compare_equal() {
        assert_eq!(Money::parse("$1,000").unwrap(), Money::parse("1000.00").unwrap());
    }
}
