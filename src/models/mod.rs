//! Core data models for PantryCLI
//!
//! This module contains the data structures of the pantry domain: products,
//! inventory items, budgets and the expenses logged against them.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod inventory;
pub mod money;
pub mod product;

pub use budget::{
    budget_stats, month_period, overlaps, Budget, BudgetStats, BudgetTier,
    BudgetValidationError,
};
pub use expense::Expense;
pub use ids::{BudgetId, ExpenseId, ItemId, ProductId, ReceiptId, UserId};
pub use inventory::{InventoryItem, StorageLocation};
pub use money::{Money, MoneyParseError};
pub use product::{Product, UnitType};
