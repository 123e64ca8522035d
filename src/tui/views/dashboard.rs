//! Dashboard panels

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::config::settings::Settings;
use crate::display::money;
use crate::format::format_date;
use crate::models::BudgetTier;
use crate::score::{self, Score, TextContrast};
use crate::services::{DashboardSummary, InventoryView};

use super::color;

fn tier_color(tier: BudgetTier) -> Color {
    match tier {
        BudgetTier::Good => Color::Green,
        BudgetTier::Warning => Color::Yellow,
        BudgetTier::Alert => Color::Rgb(0xEA, 0x58, 0x0C),
        BudgetTier::Critical => Color::Red,
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().add_modifier(Modifier::BOLD))
}

/// Budget gauge for the active budget covering today
pub fn render_budget(frame: &mut Frame, settings: &Settings, summary: &DashboardSummary, area: Rect) {
    let Some(budget) = &summary.budget else {
        let paragraph = Paragraph::new("No active budget. Create one with `pantry budget create`.")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel(" Budget "));
        frame.render_widget(paragraph, area);
        return;
    };

    let stats = &budget.stats;
    let label = format!(
        "{} / {} ({}%) - {} remaining",
        money(settings, stats.spent),
        money(settings, budget.budget.amount),
        stats.percentage,
        money(settings, stats.remaining)
    );

    let gauge = Gauge::default()
        .block(panel(" Budget ").title_bottom(Line::from(format!(" {} ", stats.tier))))
        .gauge_style(Style::default().fg(tier_color(stats.tier)))
        .percent(u16::from(stats.percentage))
        .label(label);

    frame.render_widget(gauge, area);
}

fn expiry_line(view: &InventoryView) -> ListItem<'static> {
    let status_color = color(view.status.color());
    ListItem::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(status_color)),
        Span::raw(format!("{:<22} ", view.product_name())),
        Span::styled(
            format!("{:<10} ", view.quantity_label),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(view.relative_expiry.clone(), Style::default().fg(status_color)),
    ]))
}

/// Expired items first, then those expiring within the week
pub fn render_expiring(frame: &mut Frame, summary: &DashboardSummary, area: Rect) {
    let items: Vec<ListItem> = summary
        .expired
        .iter()
        .chain(summary.expiring.iter())
        .map(expiry_line)
        .collect();

    let title = format!(
        " À consommer ({}) · Périmés ({}) ",
        summary.expiring.len(),
        summary.expired.len()
    );

    if items.is_empty() {
        let paragraph = Paragraph::new("Rien ne périme cette semaine")
            .style(Style::default().fg(Color::Green))
            .block(panel(&title));
        frame.render_widget(paragraph, area);
        return;
    }

    frame.render_widget(List::new(items).block(panel(&title)), area);
}

/// Latest purchases
pub fn render_recent(frame: &mut Frame, settings: &Settings, summary: &DashboardSummary, area: Rect) {
    let items: Vec<ListItem> = summary
        .recent
        .iter()
        .map(|view| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", format_date(view.item.purchase_date, settings.locale)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!("{} ", view.product_name())),
                Span::styled(view.quantity_label.clone(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(panel(" Achats récents ")), area);
}

/// Average Nutri-Score badge with its trend
pub fn render_nutri(frame: &mut Frame, summary: &DashboardSummary, area: Rect) {
    let nutri = &summary.nutri_score;
    let style = score::style_for(nutri.current_grade.map(Score::from));
    let badge_fg = match style.text {
        TextContrast::Light => Color::White,
        TextContrast::Dark => Color::Black,
    };

    let mut lines = vec![Line::from(vec![
        Span::raw("Moyenne "),
        Span::styled(
            format!(" {} ", style.glyph),
            Style::default()
                .fg(badge_fg)
                .bg(color(style.background))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(
            nutri
                .current
                .map(|avg| format!(" {:.2}", avg))
                .unwrap_or_default(),
        ),
    ])];

    let trend = match (nutri.variation, nutri.trend) {
        (Some(variation), Some(trend)) => {
            let trend_color = if variation > 0.0 {
                Color::Green
            } else if variation < 0.0 {
                Color::Red
            } else {
                Color::Gray
            };
            Span::styled(
                format!("{:+.1}% {}", variation, trend.label()),
                Style::default().fg(trend_color),
            )
        }
        _ => Span::styled("—", Style::default().fg(Color::DarkGray)),
    };
    lines.push(Line::from(vec![Span::raw("Évolution "), trend]));

    frame.render_widget(Paragraph::new(lines).block(panel(" Nutri-Score ")), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use crate::models::{InventoryItem, Money, Product, UnitType};
    use crate::score::Grade;
    use crate::services::{BudgetService, CreateBudgetInput, DashboardService};
    use crate::storage::Storage;
    use chrono::{Duration, NaiveDate};
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn summary() -> (TempDir, Settings, DashboardSummary) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let settings = Settings::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

        let mut product = Product::new("Yaourt", UnitType::Unit);
        product.nutriscore = Some(Grade::A);
        let mut item = InventoryItem::new(settings.user_id, product.id, 4.0, today);
        item.expiry_date = Some(today + Duration::days(1));
        storage.inventory.upsert(item).unwrap();
        storage.products.upsert(product).unwrap();

        let budget = BudgetService::new(&storage, settings.user_id)
            .create(CreateBudgetInput::monthly(Money::from_cents(20000)), today)
            .unwrap();
        storage
            .expenses
            .upsert(crate::models::Expense::new(
                budget.id,
                Money::from_cents(5000),
                today,
            ))
            .unwrap();

        let summary = DashboardService::new(&storage, settings.user_id, 5)
            .summary(today)
            .unwrap();
        (temp_dir, settings, summary)
    }

    #[test]
    fn test_panels_render() {
        let (_temp_dir, settings, summary) = summary();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal
            .draw(|frame| {
                let layout = crate::tui::layout::DashboardLayout::new(frame.area());
                render_budget(frame, &settings, &summary, layout.budget);
                render_expiring(frame, &summary, layout.expiring);
                render_recent(frame, &settings, &summary, layout.recent);
                render_nutri(frame, &summary, layout.nutri);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("(25%)"));
        assert!(text.contains("Yaourt"));
        assert!(text.contains("Périme demain"));
        assert!(text.contains("Achats récents"));
        assert!(text.contains(" A "));
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(tier_color(BudgetTier::Good), Color::Green);
        assert_eq!(tier_color(BudgetTier::Critical), Color::Red);
    }
}
