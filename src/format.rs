//! Locale-aware display formatting
//!
//! Quantities with units, money amounts and dates. Every function here is pure:
//! the only locale state is the [`Locale`] passed in by the caller (usually taken
//! from [`Settings`](crate::config::Settings)).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Money, UnitType};

/// Group separator used by French number formatting
pub const NARROW_NBSP: char = '\u{202F}';

/// Separator between a French amount and its currency symbol
pub const NBSP: char = '\u{00A0}';

/// Display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// BCP 47 tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::FrFr => "fr-FR",
            Self::EnUs => "en-US",
        }
    }

    pub fn group_separator(&self) -> char {
        match self {
            Self::FrFr => NARROW_NBSP,
            Self::EnUs => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Self::FrFr => ',',
            Self::EnUs => '.',
        }
    }

    pub fn date_pattern(&self) -> &'static str {
        match self {
            Self::FrFr => "%d/%m/%Y",
            Self::EnUs => "%m/%d/%Y",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fr" | "fr-fr" => Ok(Self::FrFr),
            "en" | "en-us" => Ok(Self::EnUs),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

/// Unit labels as (singular, plural). Only `UNIT` actually changes; the metric
/// abbreviations are invariant in French.
fn unit_labels(unit: UnitType) -> (&'static str, &'static str) {
    match unit {
        UnitType::Unit => ("unité", "unités"),
        UnitType::Kg => ("kg", "kg"),
        UnitType::G => ("g", "g"),
        UnitType::L => ("L", "L"),
        UnitType::Ml => ("mL", "mL"),
    }
}

/// Label for `unit` when displaying `quantity` of it
pub fn unit_label(unit: UnitType, quantity: f64) -> &'static str {
    let (singular, plural) = unit_labels(unit);
    if quantity > 1.0 {
        plural
    } else {
        singular
    }
}

/// Format a quantity with its unit, rounded to one decimal: integral values
/// without decimals, fractional values with one decimal.
///
/// The plural follows the displayed value, not the raw one.
pub fn format_quantity(quantity: f64, unit: UnitType) -> String {
    let shown = (quantity * 10.0).round() / 10.0;
    let number = if shown.fract() == 0.0 {
        format!("{:.0}", shown)
    } else {
        format!("{:.1}", shown)
    };
    format!("{} {}", number, unit_label(unit, shown))
}

/// Error type for quantity parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityParseError {
    InvalidFormat(String),
    Negative(String),
}

impl fmt::Display for QuantityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid quantity: {}", s),
            Self::Negative(s) => write!(f, "Quantity cannot be negative: {}", s),
        }
    }
}

impl std::error::Error for QuantityParseError {}

/// Parse a user-entered quantity ("2", "2.5", "2,5")
pub fn parse_quantity(s: &str) -> Result<f64, QuantityParseError> {
    let trimmed = s.trim();
    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| QuantityParseError::InvalidFormat(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(QuantityParseError::InvalidFormat(trimmed.to_string()));
    }
    if value < 0.0 {
        return Err(QuantityParseError::Negative(trimmed.to_string()));
    }
    Ok(value)
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Format a money amount with two decimals, locale grouping and currency symbol
///
/// fr-FR: `1 234,56 €` (narrow no-break space grouping, no-break space before
/// the symbol). en-US: `€1,234.56`.
pub fn format_currency(amount: Money, locale: Locale, symbol: &str) -> String {
    let cents = amount.cents();
    let abs = cents.unsigned_abs();
    let number = format!(
        "{}{}{:02}",
        group_digits(abs / 100, locale.group_separator()),
        locale.decimal_separator(),
        abs % 100
    );
    let sign = if cents < 0 { "-" } else { "" };

    match locale {
        Locale::FrFr => format!("{}{}{}{}", sign, number, NBSP, symbol),
        Locale::EnUs => format!("{}{}{}", sign, symbol, number),
    }
}

/// Format a calendar date for display
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    date.format(locale.date_pattern()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_units() {
        assert_eq!(format_quantity(1.0, UnitType::Unit), "1 unité");
        assert_eq!(format_quantity(3.0, UnitType::Unit), "3 unités");
        assert_eq!(format_quantity(0.0, UnitType::Unit), "0 unité");
        assert_eq!(format_quantity(2.5, UnitType::Kg), "2.5 kg");
        assert_eq!(format_quantity(500.0, UnitType::G), "500 g");
        assert_eq!(format_quantity(1.5, UnitType::L), "1.5 L");
        assert_eq!(format_quantity(250.0, UnitType::Ml), "250 mL");
    }

    #[test]
    fn test_quantity_fraction_rounds_to_one_decimal() {
        assert_eq!(format_quantity(0.26, UnitType::Kg), "0.3 kg");
        assert_eq!(format_quantity(1.84, UnitType::Unit), "1.8 unités");
    }

    #[test]
    fn test_quantity_label_follows_displayed_value() {
        assert_eq!(format_quantity(1.04, UnitType::Unit), "1 unité");
        assert_eq!(format_quantity(0.96, UnitType::Unit), "1 unité");
        assert_eq!(format_quantity(2.96, UnitType::Kg), "3 kg");
        assert_eq!(format_quantity(1.06, UnitType::Unit), "1.1 unités");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2").unwrap(), 2.0);
        assert_eq!(parse_quantity(" 2,5 ").unwrap(), 2.5);
        assert_eq!(parse_quantity("0.75").unwrap(), 0.75);
        assert!(matches!(
            parse_quantity("-1"),
            Err(QuantityParseError::Negative(_))
        ));
        assert!(parse_quantity("abc").is_err());
        assert!(parse_quantity("NaN").is_err());
    }

    #[test]
    fn test_currency_french() {
        assert_eq!(
            format_currency(Money::from_cents(123456), Locale::FrFr, "€"),
            "1\u{202F}234,56\u{A0}€"
        );
        assert_eq!(
            format_currency(Money::from_cents(500), Locale::FrFr, "€"),
            "5,00\u{A0}€"
        );
        assert_eq!(
            format_currency(Money::from_cents(-8500), Locale::FrFr, "€"),
            "-85,00\u{A0}€"
        );
        assert_eq!(
            format_currency(Money::from_cents(123456789), Locale::FrFr, "€"),
            "1\u{202F}234\u{202F}567,89\u{A0}€"
        );
    }

    #[test]
    fn test_currency_english() {
        assert_eq!(
            format_currency(Money::from_cents(123456), Locale::EnUs, "€"),
            "€1,234.56"
        );
        assert_eq!(
            format_currency(Money::from_cents(-5), Locale::EnUs, "$"),
            "-$0.05"
        );
    }

    #[test]
    fn test_currency_round_trip() {
        for cents in [0, 1, 99, 100, 21500, 123456, -8500, 100000000] {
            let amount = Money::from_cents(cents);
            for locale in [Locale::FrFr, Locale::EnUs] {
                let text = format_currency(amount, locale, "€");
                assert_eq!(Money::parse(&text).unwrap(), amount, "{}", text);
            }
        }
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(format_date(date, Locale::FrFr), "09/03/2025");
        assert_eq!(format_date(date, Locale::EnUs), "03/09/2025");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("fr-FR".parse::<Locale>().unwrap(), Locale::FrFr);
        assert_eq!("en_us".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("de-DE".parse::<Locale>().is_err());
        assert_eq!(serde_json::to_string(&Locale::FrFr).unwrap(), "\"fr-FR\"");
    }
}
