//! Layout definitions for the TUI
//!
//! Header line, budget gauge, a two-column body and the status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions of the dashboard
pub struct DashboardLayout {
    pub header: Rect,
    pub budget: Rect,
    /// Items expiring soon (left column)
    pub expiring: Rect,
    /// Latest purchases (right column, top)
    pub recent: Rect,
    /// Nutri-Score panel (right column, bottom)
    pub nutri: Rect,
    pub status_bar: Rect,
}

impl DashboardLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(4), // Budget gauge
                Constraint::Min(6),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(vertical[2]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Recent items
                Constraint::Length(6), // Nutri-Score
            ])
            .split(columns[1]);

        Self {
            header: vertical[0],
            budget: vertical[1],
            expiring: columns[0],
            recent: right[0],
            nutri: right[1],
            status_bar: vertical[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_fill_area() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.budget.height, 4);
        assert_eq!(layout.status_bar.y, 29);
        assert_eq!(layout.expiring.height, 24);
        assert_eq!(layout.recent.height + layout.nutri.height, 24);
        assert_eq!(layout.nutri.height, 6);
        assert_eq!(layout.expiring.width + layout.recent.width, 100);
    }
}
