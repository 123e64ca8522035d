//! Service layer for PantryCLI
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, derived views, and cross-entity rules such as budget
//! overlap and cascade deletion.

pub mod budget;
pub mod dashboard;
pub mod expense;
pub mod inventory;
pub mod product;

pub use budget::{BudgetService, BudgetSummary, CreateBudgetInput, UpdateBudgetInput};
pub use dashboard::{DashboardService, DashboardSummary, NutriScoreSummary};
pub use expense::{CreateExpenseInput, ExpenseService, UpdateExpenseInput};
pub use inventory::{
    AddItemInput, ConsumeOutcome, InventoryService, InventoryView, ItemFilter, ItemSort,
    ProductRef, UpdateItemInput,
};
pub use product::{CreateProductInput, ProductService, UpdateProductInput};

use crate::error::{PantryError, PantryResult};

/// Pick the single record whose id starts with `identifier`
///
/// Listings print ids shortened to 8 characters, so commands accept any
/// unambiguous leading fragment of at least 4 characters.
pub(crate) fn resolve_short<T, F>(
    records: Vec<T>,
    identifier: &str,
    matches: F,
) -> PantryResult<Option<T>>
where
    F: Fn(&T, &str) -> bool,
{
    let mut found: Vec<T> = records
        .into_iter()
        .filter(|r| matches(r, identifier))
        .collect();

    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        n => Err(PantryError::Validation(format!(
            "'{}' matches {} records; use more characters",
            identifier, n
        ))),
    }
}
