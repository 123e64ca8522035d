//! Expense service
//!
//! Logs purchases against budgets. An expense without an explicit budget is
//! attributed to the active budget whose period contains its date.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{PantryError, PantryResult};
use crate::models::{BudgetId, Expense, ExpenseId, Money, ReceiptId, UserId};
use crate::storage::Storage;

use super::resolve_short;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    user_id: UserId,
}

/// Input for logging an expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Owning budget; `None` attributes to the active budget on `date`
    pub budget_id: Option<BudgetId>,
    pub amount: Money,
    pub date: NaiveDate,
    pub source: Option<String>,
    pub receipt_id: Option<ReceiptId>,
}

impl CreateExpenseInput {
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self {
            budget_id: None,
            amount,
            date,
            source: None,
            receipt_id: None,
        }
    }
}

/// Partial update of an expense
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub source: Option<Option<String>>,
}

impl<'a> ExpenseService<'a> {
    /// Service acting on behalf of `user_id`
    pub fn new(storage: &'a Storage, user_id: UserId) -> Self {
        Self { storage, user_id }
    }

    /// Log an expense
    pub fn create(&self, input: CreateExpenseInput) -> PantryResult<Expense> {
        let budget = match input.budget_id {
            Some(id) => self
                .storage
                .budgets
                .get(id)?
                .ok_or_else(|| PantryError::budget_not_found(id.to_string()))?,
            None => self
                .storage
                .budgets
                .find_active_on(self.user_id, input.date)?
                .ok_or_else(|| {
                    PantryError::budget_not_found(format!(
                        "active on {}",
                        input.date.format("%Y-%m-%d")
                    ))
                })?,
        };

        if !budget.contains(input.date) {
            tracing::warn!(
                budget = %budget.id,
                date = %input.date,
                "expense date outside budget period"
            );
        }

        let mut expense = Expense::new(budget.id, input.amount, input.date);
        expense.source = input
            .source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        expense.receipt_id = input.receipt_id;

        expense
            .validate()
            .map_err(|e| PantryError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            expense.source.clone(),
            &expense,
        )?;

        tracing::info!(expense = %expense.id, budget = %budget.id, "logged expense");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> PantryResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full or shortened id
    pub fn find(&self, identifier: &str) -> PantryResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        resolve_short(self.storage.expenses.get_all()?, identifier, |e, s| {
            e.id.matches_short(s)
        })
    }

    pub fn require(&self, identifier: &str) -> PantryResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| PantryError::expense_not_found(identifier))
    }

    /// Expenses of a budget, sorted by date
    pub fn list_for_budget(&self, budget_id: BudgetId) -> PantryResult<Vec<Expense>> {
        self.storage.expenses.get_by_budget(budget_id)
    }

    /// Update an expense; its budget never changes
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> PantryResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| PantryError::expense_not_found(id.to_string()))?;

        let before = expense.clone();

        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(date) = input.date {
            expense.date = date;
        }
        if let Some(source) = input.source {
            expense.source = source
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
        }

        expense.touch();
        expense
            .validate()
            .map_err(|e| PantryError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            expense.source.clone(),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    /// Delete an expense; its budget is kept
    pub fn delete(&self, id: ExpenseId) -> PantryResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| PantryError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            expense.source.clone(),
            &expense,
        )?;

        Ok(expense)
    }
}
