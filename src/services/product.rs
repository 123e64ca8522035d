//! Product service
//!
//! Catalogue management: creation with barcode uniqueness, lookup by
//! barcode / name / id, partial updates, and deletion guarded against
//! products still referenced by inventory items.

use crate::audit::EntityType;
use crate::error::{PantryError, PantryResult};
use crate::models::{Product, ProductId, UnitType};
use crate::score::{Grade, NovaGroup};
use crate::storage::Storage;

use super::resolve_short;

/// Service for product management
pub struct ProductService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new product
#[derive(Debug, Clone, Default)]
pub struct CreateProductInput {
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub barcode: Option<String>,
    pub nutriscore: Option<Grade>,
    pub ecoscore: Option<Grade>,
    pub nova_group: Option<NovaGroup>,
    pub unit_type: UnitType,
}

/// Partial update of a product
///
/// `None` leaves a field unchanged; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub brand: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub barcode: Option<Option<String>>,
    pub nutriscore: Option<Option<Grade>>,
    pub ecoscore: Option<Option<Grade>>,
    pub nova_group: Option<Option<NovaGroup>>,
    pub unit_type: Option<UnitType>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl<'a> ProductService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new product
    pub fn create(&self, input: CreateProductInput) -> PantryResult<Product> {
        let mut product = Product::new(input.name.trim(), input.unit_type);
        product.brand = clean(input.brand);
        product.category = clean(input.category);
        product.barcode = clean(input.barcode);
        product.nutriscore = input.nutriscore;
        product.ecoscore = input.ecoscore;
        product.nova_group = input.nova_group;

        product
            .validate()
            .map_err(|e| PantryError::Validation(e.to_string()))?;

        self.ensure_barcode_free(product.barcode.as_deref(), None)?;

        self.storage.products.upsert(product.clone())?;
        self.storage.products.save()?;

        self.storage.log_create(
            EntityType::Product,
            product.id.to_string(),
            Some(product.name.clone()),
            &product,
        )?;

        tracing::info!(product = %product.id, name = %product.name, "created product");
        Ok(product)
    }

    pub fn get(&self, id: ProductId) -> PantryResult<Option<Product>> {
        self.storage.products.get(id)
    }

    /// Look up a scanned barcode
    pub fn find_by_barcode(&self, barcode: &str) -> PantryResult<Option<Product>> {
        self.storage.products.find_by_barcode(barcode)
    }

    /// Find a product by barcode, name (case-insensitive) or id
    pub fn find(&self, identifier: &str) -> PantryResult<Option<Product>> {
        if let Some(product) = self.storage.products.find_by_barcode(identifier)? {
            return Ok(Some(product));
        }

        if let Some(product) = self.storage.products.get_by_name(identifier)? {
            return Ok(Some(product));
        }

        if let Ok(id) = identifier.parse::<ProductId>() {
            return self.storage.products.get(id);
        }

        resolve_short(self.storage.products.get_all()?, identifier, |p, s| {
            p.id.matches_short(s)
        })
    }

    /// Find a product or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> PantryResult<Product> {
        self.find(identifier)?
            .ok_or_else(|| PantryError::product_not_found(identifier))
    }

    /// All products, sorted by name
    pub fn list(&self) -> PantryResult<Vec<Product>> {
        self.storage.products.get_all()
    }

    /// Update a product
    pub fn update(&self, id: ProductId, input: UpdateProductInput) -> PantryResult<Product> {
        let mut product = self
            .storage
            .products
            .get(id)?
            .ok_or_else(|| PantryError::product_not_found(id.to_string()))?;

        let before = product.clone();

        if let Some(name) = input.name {
            product.name = name.trim().to_string();
        }
        if let Some(brand) = input.brand {
            product.brand = clean(brand);
        }
        if let Some(category) = input.category {
            product.category = clean(category);
        }
        if let Some(barcode) = input.barcode {
            product.barcode = clean(barcode);
        }
        if let Some(nutriscore) = input.nutriscore {
            product.nutriscore = nutriscore;
        }
        if let Some(ecoscore) = input.ecoscore {
            product.ecoscore = ecoscore;
        }
        if let Some(nova_group) = input.nova_group {
            product.nova_group = nova_group;
        }
        if let Some(unit_type) = input.unit_type {
            product.unit_type = unit_type;
        }

        product.touch();
        product
            .validate()
            .map_err(|e| PantryError::Validation(e.to_string()))?;

        self.ensure_barcode_free(product.barcode.as_deref(), Some(product.id))?;

        self.storage.products.upsert(product.clone())?;
        self.storage.products.save()?;

        self.storage.log_update(
            EntityType::Product,
            product.id.to_string(),
            Some(product.name.clone()),
            &before,
            &product,
        )?;

        Ok(product)
    }

    /// Delete a product that no inventory item references
    pub fn delete(&self, id: ProductId) -> PantryResult<Product> {
        let product = self
            .storage
            .products
            .get(id)?
            .ok_or_else(|| PantryError::product_not_found(id.to_string()))?;

        let references = self.storage.inventory.get_by_product(id)?.len();
        if references > 0 {
            return Err(PantryError::Conflict(format!(
                "Product '{}' is still used by {} inventory item(s)",
                product.name, references
            )));
        }

        self.storage.products.delete(id)?;
        self.storage.products.save()?;

        self.storage.log_delete(
            EntityType::Product,
            product.id.to_string(),
            Some(product.name.clone()),
            &product,
        )?;

        Ok(product)
    }

    fn ensure_barcode_free(
        &self,
        barcode: Option<&str>,
        owner: Option<ProductId>,
    ) -> PantryResult<()> {
        let Some(barcode) = barcode else {
            return Ok(());
        };

        match self.storage.products.find_by_barcode(barcode)? {
            Some(existing) if Some(existing.id) != owner => Err(PantryError::Duplicate {
                entity_type: "Product",
                identifier: barcode.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use crate::models::InventoryItem;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn nutella() -> CreateProductInput {
        CreateProductInput {
            name: "  Pâte à tartiner ".into(),
            brand: Some("Nutella".into()),
            barcode: Some("3017620422003".into()),
            nutriscore: Some(Grade::E),
            nova_group: Some(NovaGroup::Group4),
            unit_type: UnitType::G,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProductService::new(&storage);

        let product = service.create(nutella()).unwrap();
        assert_eq!(product.name, "Pâte à tartiner");

        assert_eq!(
            service.find("3017620422003").unwrap().unwrap().id,
            product.id
        );
        assert_eq!(
            service.find("pâte à tartiner").unwrap().unwrap().id,
            product.id
        );
        let short = product.id.to_string();
        assert_eq!(service.find(&short).unwrap().unwrap().id, product.id);
        assert!(service.find("inconnu").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_barcode() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProductService::new(&storage);

        service.create(nutella()).unwrap();
        let err = service.create(nutella()).unwrap_err();
        assert!(matches!(err, PantryError::Duplicate { .. }));
    }

    #[test]
    fn test_invalid_product_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProductService::new(&storage);

        let err = service
            .create(CreateProductInput {
                name: "Lait".into(),
                barcode: Some("12".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.products.count().unwrap(), 0);
    }

    #[test]
    fn test_update_clears_and_sets() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProductService::new(&storage);
        let product = service.create(nutella()).unwrap();

        let updated = service
            .update(
                product.id,
                UpdateProductInput {
                    brand: Some(None),
                    nutriscore: Some(Some(Grade::D)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(updated.brand.is_none());
        assert_eq!(updated.nutriscore, Some(Grade::D));
        assert_eq!(updated.barcode, product.barcode);

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert!(last.diff_summary.as_ref().unwrap().contains("nutriscore"));
    }

    #[test]
    fn test_delete_rejected_while_referenced() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProductService::new(&storage);
        let product = service.create(nutella()).unwrap();

        let item = InventoryItem::new(
            crate::models::UserId::new(),
            product.id,
            1.0,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        storage.inventory.upsert(item.clone()).unwrap();

        assert!(service.delete(product.id).unwrap_err().is_conflict());

        storage.inventory.delete(item.id).unwrap();
        service.delete(product.id).unwrap();
        assert!(service.get(product.id).unwrap().is_none());
    }
}
