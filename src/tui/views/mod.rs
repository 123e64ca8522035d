//! TUI Views module
//!
//! The dashboard panels and the status bar.

pub mod dashboard;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::format::format_date;
use crate::score::Rgb;

use super::app::App;
use super::layout::DashboardLayout;

/// Convert a palette color to a terminal color
pub(crate) fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = DashboardLayout::new(frame.area());

    render_header(frame, app, layout.header);

    match &app.summary {
        Some(summary) => {
            dashboard::render_budget(frame, app.settings, summary, layout.budget);
            dashboard::render_expiring(frame, summary, layout.expiring);
            dashboard::render_recent(frame, app.settings, summary, layout.recent);
            dashboard::render_nutri(frame, summary, layout.nutri);
        }
        None => render_placeholder(frame, layout.expiring, "Loading..."),
    }

    status_bar::render(frame, app, layout.status_bar);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let date = app
        .summary
        .as_ref()
        .map(|s| s.today)
        .unwrap_or_else(|| app.settings.today());

    let line = Line::from(vec![
        Span::styled(
            " PantryCLI ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format_date(date, app.settings.locale),
            Style::default().fg(Color::Cyan),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
