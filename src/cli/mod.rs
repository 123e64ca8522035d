//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod dashboard;
pub mod expense;
pub mod export;
pub mod history;
pub mod item;
pub mod product;

pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::handle_dashboard_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::handle_history_command;
pub use item::{handle_item_command, ItemCommands};
pub use product::{handle_product_command, ProductCommands};

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::{PantryError, PantryResult};
use crate::format;
use crate::models::Money;

/// Parse a date given as `YYYY-MM-DD` or in the locale's own pattern
pub(crate) fn parse_date(s: &str, settings: &Settings) -> PantryResult<NaiveDate> {
    let s = s.trim();
    match s.to_lowercase().as_str() {
        "today" | "aujourd'hui" => return Ok(settings.today()),
        _ => {}
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, settings.locale.date_pattern()))
        .map_err(|_| {
            PantryError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or {}",
                s,
                format::format_date(settings.today(), settings.locale)
            ))
        })
}

pub(crate) fn parse_money(s: &str) -> PantryResult<Money> {
    Money::parse(s).map_err(|e| PantryError::Validation(e.to_string()))
}

pub(crate) fn parse_quantity(s: &str) -> PantryResult<f64> {
    format::parse_quantity(s).map_err(|e| PantryError::Validation(e.to_string()))
}

/// Interpret an edit flag: absent leaves the field alone, `none` or an
/// empty value clears it
pub(crate) fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let v = v.trim();
        if v.is_empty() || v.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(v.to_string())
        }
    })
}

/// Like [`clearable`], parsing the value when present
pub(crate) fn clearable_with<T, F>(value: Option<String>, parse: F) -> PantryResult<Option<Option<T>>>
where
    F: FnOnce(&str) -> PantryResult<T>,
{
    match clearable(value) {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(v)) => Ok(Some(Some(parse(&v)?))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let settings = Settings::default();
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_date("2025-03-14", &settings).unwrap(), expected);
        assert_eq!(parse_date("14/03/2025", &settings).unwrap(), expected);
        assert!(parse_date("03/14/2025", &settings).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_money_and_quantity() {
        assert_eq!(parse_money("12,50").unwrap().cents(), 1250);
        assert!(parse_money("abc").unwrap_err().is_validation());
        assert_eq!(parse_quantity("1,5").unwrap(), 1.5);
        assert!(parse_quantity("-1").unwrap_err().is_validation());
    }

    #[test]
    fn test_clearable() {
        assert_eq!(clearable(None), None);
        assert_eq!(clearable(Some("none".into())), Some(None));
        assert_eq!(clearable(Some("".into())), Some(None));
        assert_eq!(clearable(Some(" Bio ".into())), Some(Some("Bio".into())));

        let parsed = clearable_with(Some("3".into()), parse_quantity).unwrap();
        assert_eq!(parsed, Some(Some(3.0)));
    }
}
