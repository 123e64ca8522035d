//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with an index from
//! budget to its expenses.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PantryError;
use crate::models::{BudgetId, Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: budget_id -> expense_ids
    by_budget: RwLock<HashMap<BudgetId, HashSet<ExpenseId>>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_budget: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the budget index
    pub fn load(&self) -> Result<(), PantryError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_budget.clear();

        for expense in file_data.expenses {
            by_budget
                .entry(expense.budget_id)
                .or_default()
                .insert(expense.id);
            data.insert(expense.id, expense);
        }

        tracing::debug!(count = data.len(), "loaded expenses");
        Ok(())
    }

    /// Save expenses to disk, sorted by date
    pub fn save(&self) -> Result<(), PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        sort_by_date(&mut expenses);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all expenses, sorted by date
    pub fn get_all(&self) -> Result<Vec<Expense>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        sort_by_date(&mut expenses);
        Ok(expenses)
    }

    /// Expenses owned by a budget, sorted by date
    pub fn get_by_budget(&self, budget_id: BudgetId) -> Result<Vec<Expense>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_budget = self
            .by_budget
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = by_budget
            .get(&budget_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        sort_by_date(&mut expenses);
        Ok(expenses)
    }

    /// Insert or update an expense, moving it between budgets if needed
    pub fn upsert(&self, expense: Expense) -> Result<(), PantryError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_budget.get_mut(&old.budget_id) {
                ids.remove(&expense.id);
            }
        }

        by_budget
            .entry(expense.budget_id)
            .or_default()
            .insert(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    pub fn delete(&self, id: ExpenseId) -> Result<bool, PantryError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.remove(&id) {
            Some(expense) => {
                if let Some(ids) = by_budget.get_mut(&expense.budget_id) {
                    ids.remove(&id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every expense owned by a budget, returning the removed records
    pub fn delete_by_budget(&self, budget_id: BudgetId) -> Result<Vec<Expense>, PantryError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let ids = by_budget.remove(&budget_id).unwrap_or_default();
        let mut removed: Vec<_> = ids.iter().filter_map(|id| data.remove(id)).collect();
        sort_by_date(&mut removed);
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

fn sort_by_date(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
}
