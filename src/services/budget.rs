//! Budget service
//!
//! Creates and edits budgets while keeping at most one active budget per
//! overlapping period, cascades deletions to the budget's expenses, and
//! computes spending stats.

use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PantryError, PantryResult};
use crate::models::{budget_stats, month_period, Budget, BudgetId, BudgetStats, Expense, Money, UserId};
use crate::storage::Storage;

use super::resolve_short;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    user_id: UserId,
}

/// Input for creating a budget
///
/// Without an explicit period the budget covers the current calendar month.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub amount: Money,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub is_active: bool,
}

impl CreateBudgetInput {
    /// Active budget for the current month
    pub fn monthly(amount: Money) -> Self {
        Self {
            amount,
            period_start: None,
            period_end: None,
            is_active: true,
        }
    }

    pub fn with_period(amount: Money, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            amount,
            period_start: Some(start),
            period_end: Some(end),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    pub amount: Option<Money>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

/// A budget with its derived spending stats
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub budget: Budget,
    pub stats: BudgetStats,
    pub expense_count: usize,
}

impl<'a> BudgetService<'a> {
    /// Service acting on behalf of `user_id`
    pub fn new(storage: &'a Storage, user_id: UserId) -> Self {
        Self { storage, user_id }
    }

    /// Create a budget; `today` picks the default monthly period
    pub fn create(&self, input: CreateBudgetInput, today: NaiveDate) -> PantryResult<Budget> {
        let (start, end) = match (input.period_start, input.period_end) {
            (None, None) => month_period(today),
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, month_period(start).1),
            (None, Some(_)) => {
                return Err(PantryError::Validation(
                    "A period end requires a period start".into(),
                ))
            }
        };

        let mut budget = Budget::new(self.user_id, input.amount, start, end);
        budget.is_active = input.is_active;

        budget
            .validate()
            .map_err(|e| PantryError::Validation(e.to_string()))?;

        if budget.is_active {
            self.ensure_no_overlap(&budget)?;
        }

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.to_string()),
            &budget,
        )?;

        tracing::info!(budget = %budget.id, start = %start, end = %end, "created budget");
        Ok(budget)
    }

    pub fn get(&self, id: BudgetId) -> PantryResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by full or shortened id
    pub fn find(&self, identifier: &str) -> PantryResult<Option<Budget>> {
        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        resolve_short(self.list()?, identifier, |b, s| b.id.matches_short(s))
    }

    pub fn require(&self, identifier: &str) -> PantryResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| PantryError::budget_not_found(identifier))
    }

    /// The user's budgets, ordered by period start
    pub fn list(&self) -> PantryResult<Vec<Budget>> {
        Ok(self
            .storage
            .budgets
            .get_all()?
            .into_iter()
            .filter(|b| b.user_id == self.user_id)
            .collect())
    }

    /// The user's budgets with their stats
    pub fn list_with_stats(&self) -> PantryResult<Vec<BudgetSummary>> {
        self.list()?
            .into_iter()
            .map(|budget| self.summary(budget))
            .collect()
    }

    /// Active budget whose period contains `date`
    pub fn active_for(&self, date: NaiveDate) -> PantryResult<Option<Budget>> {
        self.storage.budgets.find_active_on(self.user_id, date)
    }

    /// Active budget covering `today`
    pub fn current(&self, today: NaiveDate) -> PantryResult<Option<Budget>> {
        self.active_for(today)
    }

    /// Spending stats for a budget
    pub fn stats(&self, id: BudgetId) -> PantryResult<BudgetStats> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| PantryError::budget_not_found(id.to_string()))?;

        Ok(self.summary(budget)?.stats)
    }

    pub fn summary(&self, budget: Budget) -> PantryResult<BudgetSummary> {
        let expenses = self.storage.expenses.get_by_budget(budget.id)?;
        Ok(BudgetSummary {
            stats: budget_stats(&budget, &expenses),
            expense_count: expenses.len(),
            budget,
        })
    }

    /// Update amount and/or period
    pub fn update(&self, id: BudgetId, input: UpdateBudgetInput) -> PantryResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| PantryError::budget_not_found(id.to_string()))?;

        let before = budget.clone();

        if let Some(amount) = input.amount {
            budget.amount = amount;
        }
        if let Some(start) = input.period_start {
            budget.period_start = start;
        }
        if let Some(end) = input.period_end {
            budget.period_end = end;
        }

        budget.touch();
        budget
            .validate()
            .map_err(|e| PantryError::Validation(e.to_string()))?;

        if budget.is_active {
            self.ensure_no_overlap(&budget)?;
        }

        self.save_update(&before, &budget)?;
        Ok(budget)
    }

    /// Make a budget active again (re-checks overlap)
    pub fn activate(&self, id: BudgetId) -> PantryResult<Budget> {
        self.set_active(id, true)
    }

    pub fn deactivate(&self, id: BudgetId) -> PantryResult<Budget> {
        self.set_active(id, false)
    }

    /// Delete a budget and every expense it owns
    pub fn delete(&self, id: BudgetId) -> PantryResult<(Budget, Vec<Expense>)> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| PantryError::budget_not_found(id.to_string()))?;

        let removed = self.storage.expenses.delete_by_budget(id)?;
        self.storage.budgets.delete(id)?;

        // Budget before its expenses
        self.storage.budgets.save()?;
        self.storage.expenses.save()?;

        let mut entries: Vec<AuditEntry> = removed
            .iter()
            .map(|e| AuditEntry::delete(EntityType::Expense, e.id.to_string(), e.source.clone(), e))
            .collect();
        entries.push(AuditEntry::delete(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.to_string()),
            &budget,
        ));
        self.storage.log_delete_batch(entries)?;

        tracing::info!(budget = %budget.id, expenses = removed.len(), "deleted budget");
        Ok((budget, removed))
    }

    fn set_active(&self, id: BudgetId, active: bool) -> PantryResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| PantryError::budget_not_found(id.to_string()))?;

        if budget.is_active == active {
            return Ok(budget);
        }

        let before = budget.clone();
        budget.set_active(active);

        if active {
            self.ensure_no_overlap(&budget)?;
        }

        self.save_update(&before, &budget)?;
        Ok(budget)
    }

    fn save_update(&self, before: &Budget, budget: &Budget) -> PantryResult<()> {
        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.to_string()),
            before,
            budget,
        )
    }

    /// Reject `budget` if another active budget of the same user overlaps it
    fn ensure_no_overlap(&self, budget: &Budget) -> PantryResult<()> {
        let clash = self
            .storage
            .budgets
            .get_active_by_user(budget.user_id)?
            .into_iter()
            .find(|other| other.id != budget.id && other.overlaps_with(budget));

        match clash {
            Some(other) => {
                tracing::warn!(budget = %budget.id, existing = %other.id, "overlapping active budget");
                Err(PantryError::Conflict(format!(
                    "Active budget {} already covers {}..{}",
                    other.id,
                    other.period_start.format("%Y-%m-%d"),
                    other.period_end.format("%Y-%m-%d")
                )))
            }
            None => Ok(()),
        }
    }
}
