//! Expiry classification
//!
//! Maps an optional expiry date to a freshness bucket and a French relative
//! phrase. Dates are calendar dates: the time of day never takes part in the
//! computation, so an item expiring today is `CRITICAL` whatever the hour.
//!
//! The same thresholds drive every caller (listing, dashboard, sorting):
//!
//! | days until expiry | status   |
//! |-------------------|----------|
//! | no date           | UNKNOWN  |
//! | < 0               | EXPIRED  |
//! | 0 ..= 2           | CRITICAL |
//! | 3 ..= 7           | WARNING  |
//! | > 7               | GOOD     |

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::{format_date, Locale};
use crate::score::Rgb;

/// Last day offset (inclusive) classified as CRITICAL
pub const CRITICAL_DAYS: i64 = 2;

/// Last day offset (inclusive) classified as WARNING
pub const WARNING_DAYS: i64 = 7;

const NO_DATE_LABEL: &str = "Aucune date de péremption";

/// Derived freshness bucket of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStatus {
    Good,
    Warning,
    Critical,
    Expired,
    Unknown,
}

impl ExpiryStatus {
    /// All statuses from most to least urgent
    pub const ALL: [ExpiryStatus; 5] = [
        ExpiryStatus::Expired,
        ExpiryStatus::Critical,
        ExpiryStatus::Warning,
        ExpiryStatus::Good,
        ExpiryStatus::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Frais",
            Self::Warning => "À consommer bientôt",
            Self::Critical => "À consommer rapidement",
            Self::Expired => "Périmé",
            Self::Unknown => NO_DATE_LABEL,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Good => Rgb(0x16, 0xA3, 0x4A),
            Self::Warning => Rgb(0xEA, 0xB3, 0x08),
            Self::Critical => Rgb(0xEA, 0x58, 0x0C),
            Self::Expired => Rgb(0xDC, 0x26, 0x26),
            Self::Unknown => Rgb(0x9C, 0xA3, 0xAF),
        }
    }

    /// Sort rank, lowest is most urgent
    pub fn urgency_rank(&self) -> u8 {
        match self {
            Self::Expired => 0,
            Self::Critical => 1,
            Self::Warning => 2,
            Self::Good => 3,
            Self::Unknown => 4,
        }
    }

    /// Whether the item should be surfaced in "expiring soon" widgets
    pub fn is_expiring(&self) -> bool {
        matches!(self, Self::Critical | Self::Warning)
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whole days from `today` to `expiry` (negative once expired)
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Classify an optional expiry date relative to `today`
pub fn classify(expiry: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    let Some(expiry) = expiry else {
        return ExpiryStatus::Unknown;
    };

    match days_until(expiry, today) {
        d if d < 0 => ExpiryStatus::Expired,
        d if d <= CRITICAL_DAYS => ExpiryStatus::Critical,
        d if d <= WARNING_DAYS => ExpiryStatus::Warning,
        _ => ExpiryStatus::Good,
    }
}

fn plural(count: i64, singular: &'static str, plural: &'static str) -> &'static str {
    if count > 1 {
        plural
    } else {
        singular
    }
}

/// French relative phrase for an optional expiry date
///
/// "Expiré depuis 3 jours", "Périme aujourd'hui", "Périme demain",
/// "Périme dans 5 jours", and "Périme le 15/03/2025" past a week.
pub fn format_relative(expiry: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(expiry) = expiry else {
        return NO_DATE_LABEL.to_string();
    };

    let diff = days_until(expiry, today);
    if diff < 0 {
        let elapsed = -diff;
        return if elapsed >= 365 {
            let years = elapsed / 365;
            format!("Expiré depuis {} {}", years, plural(years, "an", "ans"))
        } else if elapsed >= 31 {
            format!("Expiré depuis {} mois", elapsed / 31)
        } else {
            format!(
                "Expiré depuis {} {}",
                elapsed,
                plural(elapsed, "jour", "jours")
            )
        };
    }

    match diff {
        0 => "Périme aujourd'hui".to_string(),
        1 => "Périme demain".to_string(),
        d if d <= WARNING_DAYS => format!("Périme dans {} jours", d),
        _ => format!("Périme le {}", format_date(expiry, Locale::FrFr)),
    }
}

/// Stable sort by expiry date, soonest first, undated entries last
pub fn sort_by_expiry<T, F>(items: &mut [T], expiry_of: F)
where
    F: Fn(&T) -> Option<NaiveDate>,
{
    items.sort_by(|a, b| match (expiry_of(a), expiry_of(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
