//! Display formatting for terminal output
//!
//! Listings are rendered as `tabled` tables; single records and the
//! dashboard as aligned text blocks. Money and dates follow the configured
//! locale.

pub mod budget;
pub mod dashboard;
pub mod inventory;
pub mod product;

pub use budget::{format_budget_details, format_budget_list, format_expense_list};
pub use dashboard::format_dashboard;
pub use inventory::{format_item_details, format_item_list};
pub use product::{format_product_details, format_product_list};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::format::format_currency;
use crate::models::Money;

/// Money in the configured locale and currency
pub(crate) fn money(settings: &Settings, amount: Money) -> String {
    format_currency(amount, settings.locale, &settings.currency_symbol)
}

/// Render rows with the shared table style
pub(crate) fn table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::psql()).to_string()
}

pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
