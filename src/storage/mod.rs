//! Storage layer for PantryCLI
//!
//! JSON files with atomic writes, one repository per record type, and the
//! audit trail for every mutation.

pub mod budgets;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod inventory;
pub mod products;

pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use inventory::InventoryRepository;
pub use products::ProductRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::PantryPaths;
use crate::error::PantryError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PantryPaths,
    audit: AuditLogger,
    pub products: ProductRepository,
    pub inventory: InventoryRepository,
    pub budgets: BudgetRepository,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: PantryPaths) -> Result<Self, PantryError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            products: ProductRepository::new(paths.products_file()),
            inventory: InventoryRepository::new(paths.inventory_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &PantryPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), PantryError> {
        self.products.load()?;
        self.inventory.load()?;
        self.budgets.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PantryError> {
        self.products.save()?;
        self.inventory.save()?;
        self.budgets.save()?;
        self.expenses.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PantryError> {
        self.audit.log(&AuditEntry::create(
            entity_type,
            entity_id,
            entity_name,
            entity,
        ))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), PantryError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PantryError> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id,
            entity_name,
            entity,
        ))
    }

    /// Record several deletions at once (cascades)
    pub fn log_delete_batch(&self, entries: Vec<AuditEntry>) -> Result<(), PantryError> {
        self.audit.log_batch(&entries)
    }
}
