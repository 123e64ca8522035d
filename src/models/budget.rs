//! Budget model and spending aggregation
//!
//! A budget is a spending allowance over an inclusive date range. Expenses
//! are attributed to exactly one budget; the budget's stats (spent, remaining,
//! percentage, tier) are derived from them on every read.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Expense;
use super::ids::{BudgetId, UserId};
use super::money::Money;

/// A spending allowance for a period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub user_id: UserId,

    /// Allowance for the whole period
    pub amount: Money,

    /// First day of the period (inclusive)
    pub period_start: NaiveDate,

    /// Last day of the period (inclusive)
    pub period_end: NaiveDate,

    /// Whether new expenses may be attributed to this budget
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new active budget
    pub fn new(
        user_id: UserId,
        amount: Money,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            amount,
            period_start,
            period_end,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an active budget covering the calendar month of `today`
    pub fn monthly(user_id: UserId, amount: Money, today: NaiveDate) -> Self {
        let (start, end) = month_period(today);
        Self::new(user_id, amount, start, end)
    }

    /// Check if a date falls within this budget's period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }

    /// Check if this budget's period shares at least one day with another's
    pub fn overlaps_with(&self, other: &Budget) -> bool {
        overlaps(
            self.period_start,
            self.period_end,
            other.period_start,
            other.period_end,
        )
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount);
        }

        if self.period_end < self.period_start {
            return Err(BudgetValidationError::EndBeforeStart {
                start: self.period_start,
                end: self.period_end,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}..{})",
            self.amount,
            self.period_start.format("%Y-%m-%d"),
            self.period_end.format("%Y-%m-%d")
        )
    }
}

/// Inclusive overlap test between two date ranges
pub fn overlaps(
    start_a: NaiveDate,
    end_a: NaiveDate,
    start_b: NaiveDate,
    end_b: NaiveDate,
) -> bool {
    start_a <= end_b && start_b <= end_a
}

/// First and last calendar day of the month containing `today`
pub fn month_period(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month
        .map(|d| d - Duration::days(1))
        .unwrap_or(start);
    (start, end)
}

/// Alert level derived from the share of the allowance already spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetTier {
    Good,
    Warning,
    Alert,
    Critical,
}

impl BudgetTier {
    /// Tier for a spent percentage (0..=100)
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            p if p < 65 => Self::Good,
            p if p < 80 => Self::Warning,
            p if p < 90 => Self::Alert,
            _ => Self::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Dans le budget",
            Self::Warning => "Attention",
            Self::Alert => "Alerte",
            Self::Critical => "Budget épuisé",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Derived spending figures of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStats {
    pub spent: Money,
    /// May be negative when the budget is overspent
    pub remaining: Money,
    /// Share of the allowance spent, capped at 100
    pub percentage: u8,
    pub tier: BudgetTier,
}

impl BudgetStats {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Spent share of `amount` in percent, rounded half up and capped at 100;
/// 0 when the allowance is zero or negative.
pub fn spent_percentage(spent: Money, amount: Money) -> u8 {
    if !amount.is_positive() {
        return 0;
    }
    let spent = i128::from(spent.cents().max(0));
    let amount = i128::from(amount.cents());
    let rounded = (spent * 200 + amount) / (amount * 2);
    rounded.min(100) as u8
}

/// Aggregate the expenses belonging to `budget`
///
/// Expenses attributed to other budgets are ignored.
pub fn budget_stats<'a, I>(budget: &Budget, expenses: I) -> BudgetStats
where
    I: IntoIterator<Item = &'a Expense>,
{
    let spent: Money = expenses
        .into_iter()
        .filter(|e| e.budget_id == budget.id)
        .map(|e| e.amount)
        .sum();

    let percentage = spent_percentage(spent, budget.amount);

    BudgetStats {
        spent,
        remaining: budget.amount - spent,
        percentage,
        tier: BudgetTier::from_percentage(percentage),
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeAmount,
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Budget amount cannot be negative"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Budget period ends ({}) before it starts ({})", end, start)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
