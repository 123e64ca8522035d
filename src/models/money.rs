//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Formatting is locale-aware (see [`crate::format`]); parsing accepts
//! both the French and English renderings so that a formatted amount can be
//! read back to the cent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::format::{format_currency, Locale};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Largest magnitude `Money::parse` accepts: ten billion units
pub const MAX_PARSED_CENTS: i64 = 1_000_000_000_000;

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use pantry_cli::models::Money;
    /// let amount = Money::from_cents(1050); // 10,50 €
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    ///
    /// # Examples
    /// ```
    /// use pantry_cli::models::Money;
    /// let amount = Money::from_units(300, 0); // 300,00 €
    /// assert_eq!(amount.cents(), 30000);
    /// ```
    pub const fn from_units(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Approximate value in currency units, for ratios and spreadsheets
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "12", "12.5", "12,50", "-3", "1 234,56 €", "€1,234.56".
    /// When both `,` and `.` appear, the last one is the decimal separator.
    /// A lone `,` is decimal only when followed by at most two digits.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let mut body: String = original.chars().filter(|c| !c.is_whitespace()).collect();

        let negative = body.starts_with('-');
        if negative {
            body.remove(0);
        }

        // Currency symbol or code on either side
        let body = body.trim_matches(|c: char| !c.is_ascii_digit() && c != ',' && c != '.');
        if body.is_empty() {
            return Err(invalid());
        }

        let last_comma = body.rfind(',');
        let last_dot = body.rfind('.');
        let decimal_pos = match (last_comma, last_dot) {
            (Some(c), Some(d)) => Some(c.max(d)),
            (Some(c), None) => {
                if body.matches(',').count() == 1 && body.len() - c - 1 <= 2 {
                    Some(c)
                } else {
                    None
                }
            }
            (None, Some(d)) => {
                if body.matches('.').count() == 1 {
                    Some(d)
                } else {
                    None
                }
            }
            (None, None) => None,
        };

        let (int_part, frac_part) = match decimal_pos {
            Some(pos) => (&body[..pos], &body[pos + 1..]),
            None => (body, ""),
        };

        let int_digits: String = int_part.chars().filter(|c| *c != ',' && *c != '.').collect();
        if !int_digits.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
            || (int_digits.is_empty() && frac_part.is_empty())
        {
            return Err(invalid());
        }
        if frac_part.len() > 2 {
            return Err(MoneyParseError::TooPrecise(original.to_string()));
        }

        let units: i64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };
        let cents_part: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac_part.parse().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents_part))
            .ok_or_else(invalid)?;
        if cents > MAX_PARSED_CENTS {
            return Err(MoneyParseError::TooLarge(original.to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format for a locale and currency symbol
    pub fn format(&self, locale: Locale, symbol: &str) -> String {
        format_currency(*self, locale, symbol)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(Locale::FrFr, "€"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| Self(acc.0.saturating_add(m.0)))
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    TooLarge(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Amounts are limited to two decimals: {}", s)
            }
            MoneyParseError::TooLarge(s) => write!(f, "Amount too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_french() {
        assert_eq!(Money::from_cents(1050).to_string(), "10,50\u{A0}€");
        assert_eq!(Money::from_cents(-8500).to_string(), "-85,00\u{A0}€");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(300, 0);
        let b = Money::from_units(215, 0);

        assert_eq!((a - b).cents(), 8500);
        assert_eq!((b - a).cents(), -8500);
        assert_eq!((-a).cents(), -30000);
        assert_eq!(
            vec![Money::from_units(120, 0), Money::from_units(95, 0)]
                .into_iter()
                .sum::<Money>(),
            b
        );
    }

    #[test]
    fn test_parse_rejects_huge_amounts() {
        assert_eq!(
            Money::parse("10000000000").unwrap().cents(),
            MAX_PARSED_CENTS
        );
        assert!(matches!(
            Money::parse("90000000000000000"),
            Err(MoneyParseError::TooLarge(_))
        ));
        assert!(matches!(
            Money::parse("-10000000000,01"),
            Err(MoneyParseError::TooLarge(_))
        ));
    }

    #[test]
    fn test_sum_saturates() {
        let huge = Money::from_cents(i64::MAX - 1);
        let total: Money = vec![huge, huge, Money::from_cents(5)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-3").unwrap().cents(), -300);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(",5").unwrap().cents(), 50);
    }

    #[test]
    fn test_parse_localized() {
        assert_eq!(Money::parse("1 234,56 €").unwrap().cents(), 123456);
        assert_eq!(Money::parse("1\u{202F}234,56\u{A0}€").unwrap().cents(), 123456);
        assert_eq!(Money::parse("€1,234.56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("1.234,56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("-$0.05").unwrap().cents(), -5);
        assert_eq!(Money::parse("12 EUR").unwrap().cents(), 1200);
        // A lone comma followed by three digits is a thousands separator
        assert_eq!(Money::parse("1,234").unwrap().cents(), 123400);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("€").is_err());
        assert!(Money::parse("12a4").is_err());
        assert!(matches!(
            Money::parse("1.234"),
            Err(MoneyParseError::TooPrecise(_))
        ));
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
