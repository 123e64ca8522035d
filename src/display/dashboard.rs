//! Dashboard text rendering

use crate::config::settings::Settings;
use crate::expiry::ExpiryStatus;
use crate::format::format_date;
use crate::score::{self, Score};
use crate::services::{DashboardSummary, InventoryView, NutriScoreSummary};

use super::money;

const BAR_WIDTH: usize = 20;

fn bar(percentage: u8) -> String {
    let filled = (percentage as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn item_line(view: &InventoryView) -> String {
    format!(
        "  {:<24} {:<12} {}\n",
        view.product_name(),
        view.quantity_label,
        view.relative_expiry
    )
}

fn nutri_block(nutri: &NutriScoreSummary) -> String {
    let mut output = String::from("Nutri-Score\n");

    let Some(current) = nutri.current else {
        output.push_str("  No graded products\n");
        return output;
    };

    let badge = score::style_for(nutri.current_grade.map(Score::from));
    output.push_str(&format!(
        "  Average:     {} ({:.2}) {}\n",
        badge.glyph,
        current,
        badge.background.hex()
    ));

    match (nutri.variation, nutri.trend) {
        (Some(variation), Some(trend)) => output.push_str(&format!(
            "  Trend:       {:+.1}% {}\n",
            variation,
            trend.label()
        )),
        _ => output.push_str("  Trend:       -\n"),
    }

    output
}

/// Render the dashboard as plain text
pub fn format_dashboard(summary: &DashboardSummary, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Dashboard - {}\n\n",
        format_date(summary.today, settings.locale)
    ));

    output.push_str(&format!("Inventory: {} item(s)\n", summary.total_items));
    for (status, count) in &summary.status_counts {
        output.push_str(&format!("  {:<26} {}\n", status.label(), count));
    }
    output.push('\n');

    output.push_str("Budget\n");
    match &summary.budget {
        Some(budget) => {
            let stats = &budget.stats;
            output.push_str(&format!(
                "  {} {}% {}\n",
                bar(stats.percentage),
                stats.percentage,
                stats.tier
            ));
            output.push_str(&format!(
                "  Spent {} of {}, {} remaining\n",
                money(settings, stats.spent),
                money(settings, budget.budget.amount),
                money(settings, stats.remaining)
            ));
        }
        None => output.push_str("  No active budget\n"),
    }
    output.push('\n');

    output.push_str(&format!(
        "Expiring soon ({})\n",
        summary.expiring.len()
    ));
    if summary.expiring.is_empty() {
        output.push_str("  Nothing expiring this week\n");
    }
    for view in &summary.expiring {
        output.push_str(&item_line(view));
    }

    if summary.count(ExpiryStatus::Expired) > 0 {
        output.push_str(&format!("\nExpired ({})\n", summary.expired.len()));
        for view in &summary.expired {
            output.push_str(&item_line(view));
        }
    }
    output.push('\n');

    output.push_str("Recent purchases\n");
    if summary.recent.is_empty() {
        output.push_str("  No items yet\n");
    }
    for view in &summary.recent {
        output.push_str(&format!(
            "  {:<24} {:<12} {}\n",
            view.product_name(),
            view.quantity_label,
            format_date(view.item.purchase_date, settings.locale)
        ));
    }
    output.push('\n');

    output.push_str(&nutri_block(&summary.nutri_score));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Grade, Trend};
    use chrono::NaiveDate;

    fn empty() -> DashboardSummary {
        DashboardSummary {
            today: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            total_items: 0,
            status_counts: ExpiryStatus::ALL.iter().map(|s| (*s, 0)).collect(),
            expiring: Vec::new(),
            expired: Vec::new(),
            recent: Vec::new(),
            nutri_score: NutriScoreSummary {
                current: None,
                current_grade: None,
                previous: None,
                previous_grade: None,
                variation: None,
                trend: None,
            },
            budget: None,
        }
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(bar(50), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(bar(100), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn test_empty_dashboard() {
        let output = format_dashboard(&empty(), &Settings::default());
        assert!(output.starts_with("Dashboard - 15/03/2025"));
        assert!(output.contains("No active budget"));
        assert!(output.contains("Nothing expiring this week"));
        assert!(output.contains("No graded products"));
        assert!(!output.contains("Expired ("));
    }

    #[test]
    fn test_nutri_block_with_trend() {
        let nutri = NutriScoreSummary {
            current: Some(4.0),
            current_grade: Some(Grade::B),
            previous: Some(3.0),
            previous_grade: Some(Grade::C),
            variation: Some(33.333),
            trend: Some(Trend::Improving),
        };

        let output = nutri_block(&nutri);
        assert!(output.contains("Average:     B (4.00) #85BB2F"));
        assert!(output.contains("+33.3% en amélioration"));
    }
}
