//! User settings for PantryCLI
//!
//! Manages user preferences: display locale, currency symbol, timezone used for
//! "today" and monthly budget periods, dashboard limits and receipt polling.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::paths::PantryPaths;
use crate::error::PantryError;
use crate::format::Locale;
use crate::models::UserId;

/// Largest accepted fixed UTC offset, in minutes either side of UTC
pub const MAX_UTC_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// User settings for PantryCLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Owner of every record created by this installation
    #[serde(default)]
    pub user_id: UserId,

    /// Display locale for money, dates and labels
    #[serde(default)]
    pub locale: Locale,

    /// Currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Fixed UTC offset in minutes; `None` follows the system timezone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,

    /// Number of entries in the dashboard "recent items" widget
    #[serde(default = "default_recent_items_limit")]
    pub recent_items_limit: usize,

    /// Delay between two receipt status requests
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum number of receipt status requests before giving up
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,

    /// Consecutive transport errors tolerated while polling
    #[serde(default = "default_poll_max_transport_errors")]
    pub poll_max_transport_errors: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_recent_items_limit() -> usize {
    5
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_poll_max_attempts() -> u32 {
    30
}

fn default_poll_max_transport_errors() -> u32 {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: UserId::new(),
            locale: Locale::default(),
            currency_symbol: default_currency(),
            utc_offset_minutes: None,
            recent_items_limit: default_recent_items_limit(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_max_attempts: default_poll_max_attempts(),
            poll_max_transport_errors: default_poll_max_transport_errors(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PantryPaths) -> Result<Self, PantryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PantryError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PantryError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PantryPaths) -> Result<(), PantryError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PantryError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PantryError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Set the fixed UTC offset, `None` following the system timezone
    pub fn set_utc_offset(&mut self, minutes: Option<i32>) -> Result<(), PantryError> {
        if let Some(m) = minutes {
            if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&m) {
                return Err(PantryError::Validation(format!(
                    "UTC offset must be between -{0} and {0} minutes, got {1}",
                    MAX_UTC_OFFSET_MINUTES, m
                )));
            }
        }
        self.utc_offset_minutes = minutes;
        Ok(())
    }

    /// The configured fixed offset, if any and if in range
    fn fixed_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
    }

    /// Calendar date of an instant in the configured timezone
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        match self.fixed_offset() {
            Some(offset) => at.with_timezone(&offset).date_naive(),
            None => at.with_timezone(&Local).date_naive(),
        }
    }

    /// Today's date in the configured timezone
    pub fn today(&self) -> NaiveDate {
        self.local_date(Utc::now())
    }
}
