//! JSON Export functionality
//!
//! Exports the complete database to JSON format with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PantryError, PantryResult};
use crate::models::{Budget, Expense, InventoryItem, Product};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub products: Vec<Product>,
    pub inventory: Vec<InventoryItem>,
    pub budgets: Vec<Budget>,
    pub expenses: Vec<Expense>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub product_count: usize,
    pub item_count: usize,
    pub budget_count: usize,
    pub expense_count: usize,

    /// Total of all expenses, in cents
    pub total_spent_cents: i64,
}

impl FullExport {
    /// Snapshot every repository
    pub fn from_storage(storage: &Storage) -> PantryResult<Self> {
        let products = storage.products.get_all()?;
        let inventory = storage.inventory.get_all()?;
        let budgets = storage.budgets.get_all()?;
        let expenses = storage.expenses.get_all()?;

        let metadata = ExportMetadata {
            product_count: products.len(),
            item_count: inventory.len(),
            budget_count: budgets.len(),
            expense_count: expenses.len(),
            total_spent_cents: expenses.iter().map(|e| e.amount.cents()).sum(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            products,
            inventory,
            budgets,
            expenses,
            metadata,
        })
    }

    /// Check schema version and references between collections
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let product_ids: HashSet<_> = self.products.iter().map(|p| p.id).collect();
        let budget_ids: HashSet<_> = self.budgets.iter().map(|b| b.id).collect();

        for item in &self.inventory {
            if !product_ids.contains(&item.product_id) {
                return Err(format!(
                    "Item {} references unknown product {}",
                    item.id, item.product_id
                ));
            }
        }

        for expense in &self.expenses {
            if !budget_ids.contains(&expense.budget_id) {
                return Err(format!(
                    "Expense {} references unknown budget {}",
                    expense.id, expense.budget_id
                ));
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> PantryResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| PantryError::Export(e.to_string()))?;

    tracing::info!(
        products = export.metadata.product_count,
        items = export.metadata.item_count,
        "exported database as JSON"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use crate::models::{BudgetId, Money, UnitType, UserId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage) {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let user = UserId::new();
        let product = Product::new("Lait demi-écrémé", UnitType::L);
        storage
            .inventory
            .upsert(InventoryItem::new(user, product.id, 2.0, day))
            .unwrap();
        storage.products.upsert(product).unwrap();

        let budget = Budget::monthly(user, Money::from_cents(30000), day);
        storage
            .expenses
            .upsert(Expense::new(budget.id, Money::from_cents(4599), day))
            .unwrap();
        storage.budgets.upsert(budget).unwrap();
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.product_count, 1);
        assert_eq!(export.metadata.item_count, 1);
        assert_eq!(export.metadata.expense_count, 1);
        assert_eq!(export.metadata.total_spent_cents, 4599);
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_is_readable_back() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.products[0].name, "Lait demi-écrémé");
        assert_eq!(parsed.expenses[0].amount.cents(), 4599);
    }

    #[test]
    fn test_validate_catches_dangling_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.expenses.push(Expense::new(
            BudgetId::new(),
            Money::from_cents(100),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ));

        let err = export.validate().unwrap_err();
        assert!(err.contains("unknown budget"));
    }
}
