//! Inventory repository for JSON storage
//!
//! Manages loading and saving inventory items to inventory.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PantryError;
use crate::models::{InventoryItem, ItemId, ProductId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct InventoryData {
    items: Vec<InventoryItem>,
}

/// Repository for inventory item persistence
pub struct InventoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<ItemId, InventoryItem>>,
}

impl InventoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load items from disk
    pub fn load(&self) -> Result<(), PantryError> {
        let file_data: InventoryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for item in file_data.items {
            data.insert(item.id, item);
        }

        tracing::debug!(count = data.len(), "loaded inventory items");
        Ok(())
    }

    /// Save items to disk, oldest purchase first
    pub fn save(&self) -> Result<(), PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut items: Vec<_> = data.values().cloned().collect();
        items.sort_by(|a, b| {
            a.purchase_date
                .cmp(&b.purchase_date)
                .then(a.created_at.cmp(&b.created_at))
        });

        write_json_atomic(&self.path, &InventoryData { items })
    }

    pub fn get(&self, id: ItemId) -> Result<Option<InventoryItem>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all items, most recent purchase first
    pub fn get_all(&self) -> Result<Vec<InventoryItem>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut items: Vec<_> = data.values().cloned().collect();
        items.sort_by(|a, b| {
            b.purchase_date
                .cmp(&a.purchase_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(items)
    }

    /// Items owned by a user
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<InventoryItem>, PantryError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|item| item.user_id == user_id)
            .collect())
    }

    /// Items referencing a product
    pub fn get_by_product(&self, product_id: ProductId) -> Result<Vec<InventoryItem>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .filter(|item| item.product_id == product_id)
            .cloned()
            .collect())
    }

    pub fn upsert(&self, item: InventoryItem) -> Result<(), PantryError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(item.id, item);
        Ok(())
    }

    pub fn delete(&self, id: ItemId) -> Result<bool, PantryError> {
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
