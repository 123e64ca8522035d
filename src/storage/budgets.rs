//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::PantryError;
use crate::models::{Budget, BudgetId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), PantryError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }

        tracing::debug!(count = data.len(), "loaded budgets");
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), PantryError> {
        let budgets = self.get_all()?;
        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all budgets, ordered by period start
    pub fn get_all(&self) -> Result<Vec<Budget>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| {
            a.period_start
                .cmp(&b.period_start)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(budgets)
    }

    /// Active budgets owned by a user
    pub fn get_active_by_user(&self, user_id: UserId) -> Result<Vec<Budget>, PantryError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.user_id == user_id && b.is_active)
            .collect())
    }

    /// The user's active budget whose period contains `date`
    pub fn find_active_on(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<Option<Budget>, PantryError> {
        Ok(self
            .get_active_by_user(user_id)?
            .into_iter()
            .find(|b| b.contains(date)))
    }

    pub fn upsert(&self, budget: Budget) -> Result<(), PantryError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(budget.id, budget);
        Ok(())
    }

    pub fn delete(&self, id: BudgetId) -> Result<bool, PantryError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        (temp_dir, repo)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_find_active_on() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();

        let january = Budget::monthly(user, Money::from_cents(40000), date(1, 10));
        let mut february = Budget::monthly(user, Money::from_cents(40000), date(2, 10));
        february.set_active(false);
        repo.upsert(january.clone()).unwrap();
        repo.upsert(february).unwrap();

        let found = repo.find_active_on(user, date(1, 31)).unwrap();
        assert_eq!(found.map(|b| b.id), Some(january.id));
        assert!(repo.find_active_on(user, date(2, 1)).unwrap().is_none());
        assert!(repo
            .find_active_on(UserId::new(), date(1, 15))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_save_and_reload_ordered() {
        let (temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        repo.upsert(Budget::monthly(user, Money::from_cents(100), date(3, 1)))
            .unwrap();
        repo.upsert(Budget::monthly(user, Money::from_cents(100), date(1, 1)))
            .unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo2.load().unwrap();
        let starts: Vec<_> = repo2
            .get_all()
            .unwrap()
            .iter()
            .map(|b| b.period_start)
            .collect();
        assert_eq!(starts, vec![date(1, 1), date(3, 1)]);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let budget = Budget::monthly(UserId::new(), Money::from_cents(100), date(1, 1));
        let id = budget.id;
        repo.upsert(budget).unwrap();
        assert!(repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }
}
