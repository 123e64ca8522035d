//! Budget and expense display formatting

use tabled::Tabled;

use crate::config::settings::Settings;
use crate::format::format_date;
use crate::models::{Budget, Expense};
use crate::services::BudgetSummary;

use super::{money, or_dash, table};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Période")]
    period: String,
    #[tabled(rename = "Montant")]
    amount: String,
    #[tabled(rename = "Dépensé")]
    spent: String,
    #[tabled(rename = "Restant")]
    remaining: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "Statut")]
    tier: String,
    #[tabled(rename = "Actif")]
    active: &'static str,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Montant")]
    amount: String,
    #[tabled(rename = "Source")]
    source: String,
}

fn period(budget: &Budget, settings: &Settings) -> String {
    format!(
        "{} - {}",
        format_date(budget.period_start, settings.locale),
        format_date(budget.period_end, settings.locale)
    )
}

/// Format budgets with their stats as a table
pub fn format_budget_list(summaries: &[BudgetSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = summaries
        .iter()
        .map(|s| BudgetRow {
            id: s.budget.id.to_string(),
            period: period(&s.budget, settings),
            amount: money(settings, s.budget.amount),
            spent: money(settings, s.stats.spent),
            remaining: money(settings, s.stats.remaining),
            percentage: format!("{}%", s.stats.percentage),
            tier: s.stats.tier.label().to_string(),
            active: if s.budget.is_active { "oui" } else { "non" },
        })
        .collect();

    table(rows)
}

/// Format a single budget's details
pub fn format_budget_details(summary: &BudgetSummary, settings: &Settings) -> String {
    let budget = &summary.budget;
    let stats = &summary.stats;
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", budget.id));
    output.push_str(&format!("  Period:      {}\n", period(budget, settings)));
    output.push_str(&format!("  Amount:      {}\n", money(settings, budget.amount)));
    output.push_str(&format!("  Spent:       {}\n", money(settings, stats.spent)));
    output.push_str(&format!("  Remaining:   {}\n", money(settings, stats.remaining)));
    output.push_str(&format!(
        "  Used:        {}% ({})\n",
        stats.percentage, stats.tier
    ));
    output.push_str(&format!(
        "  Active:      {}\n",
        if budget.is_active { "Yes" } else { "No" }
    ));
    output.push_str(&format!("  Expenses:    {}\n", summary.expense_count));

    if stats.is_overspent() {
        output.push_str("  Overspent!\n");
    }

    output
}

/// Format expenses as a table
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            date: format_date(e.date, settings.locale),
            amount: money(settings, e.amount),
            source: or_dash(e.source.as_deref()),
        })
        .collect();

    let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();
    format!("{}\nTotal: {}", table(rows), money(settings, total))
}
