//! Product repository for JSON storage
//!
//! Manages loading and saving products to products.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PantryError;
use crate::models::{Product, ProductId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable product data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProductData {
    products: Vec<Product>,
}

/// Repository for product persistence
pub struct ProductRepository {
    path: PathBuf,
    data: RwLock<HashMap<ProductId, Product>>,
    /// Index: barcode -> product_id
    by_barcode: RwLock<HashMap<String, ProductId>>,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_barcode: RwLock::new(HashMap::new()),
        }
    }

    /// Load products from disk
    pub fn load(&self) -> Result<(), PantryError> {
        let file_data: ProductData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_barcode = self
            .by_barcode
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_barcode.clear();

        for product in file_data.products {
            if let Some(barcode) = &product.barcode {
                by_barcode.insert(barcode.clone(), product.id);
            }
            data.insert(product.id, product);
        }

        tracing::debug!(count = data.len(), "loaded products");
        Ok(())
    }

    /// Save products to disk
    pub fn save(&self) -> Result<(), PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut products: Vec<_> = data.values().cloned().collect();
        products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let file_data = ProductData { products };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a product by ID
    pub fn get(&self, id: ProductId) -> Result<Option<Product>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all products, sorted by name
    pub fn get_all(&self) -> Result<Vec<Product>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut products: Vec<_> = data.values().cloned().collect();
        products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(products)
    }

    /// Look up a product by its exact barcode
    pub fn find_by_barcode(&self, barcode: &str) -> Result<Option<Product>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_barcode = self
            .by_barcode
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_barcode
            .get(barcode.trim())
            .and_then(|id| data.get(id))
            .cloned())
    }

    /// Look up a product by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Product>, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|p| p.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a product
    pub fn upsert(&self, product: Product) -> Result<(), PantryError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_barcode = self
            .by_barcode
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old_barcode) = data.get(&product.id).and_then(|old| old.barcode.clone()) {
            by_barcode.remove(&old_barcode);
        }

        if let Some(barcode) = &product.barcode {
            by_barcode.insert(barcode.clone(), product.id);
        }

        data.insert(product.id, product);
        Ok(())
    }

    /// Delete a product
    pub fn delete(&self, id: ProductId) -> Result<bool, PantryError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_barcode = self
            .by_barcode
            .write()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.remove(&id) {
            Some(product) => {
                if let Some(barcode) = &product.barcode {
                    by_barcode.remove(barcode);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count products
    pub fn count(&self) -> Result<usize, PantryError> {
        let data = self
            .data
            .read()
            .map_err(|e| PantryError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
