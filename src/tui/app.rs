//! Application state for the TUI
//!
//! The App struct holds the dashboard data being rendered and the flags the
//! event handler toggles.

use chrono::{Local, NaiveTime};

use crate::config::settings::Settings;
use crate::services::{DashboardService, DashboardSummary};
use crate::storage::Storage;

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Last successfully computed dashboard
    pub summary: Option<DashboardSummary>,

    /// Local time of the last refresh attempt
    pub refreshed_at: Option<NaiveTime>,

    /// Error or info shown in the status bar
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            should_quit: false,
            summary: None,
            refreshed_at: None,
            status_message: None,
        }
    }

    /// Reload data from disk and recompute the dashboard
    ///
    /// On failure the previous dashboard stays on screen and the error is
    /// shown in the status bar.
    pub fn refresh(&mut self) {
        self.refreshed_at = Some(Local::now().time());

        let result = self.storage.load_all().and_then(|_| {
            DashboardService::new(
                self.storage,
                self.settings.user_id,
                self.settings.recent_items_limit,
            )
            .summary(self.settings.today())
        });

        match result {
            Ok(summary) => {
                self.summary = Some(summary);
                self.status_message = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "dashboard refresh failed");
                self.status_message = Some(e.to_string());
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
