//! Inventory service
//!
//! Adding items (by product id or scanned barcode), partial updates,
//! consumption, and the `InventoryView` presentation record whose expiry
//! status and labels are recomputed on every read.

use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::EntityType;
use crate::error::{PantryError, PantryResult};
use crate::expiry::{self, ExpiryStatus};
use crate::format;
use crate::models::{
    InventoryItem, ItemId, Money, Product, ProductId, StorageLocation, UnitType, UserId,
};
use crate::storage::Storage;

use super::resolve_short;

/// Service for inventory management
pub struct InventoryService<'a> {
    storage: &'a Storage,
    user_id: UserId,
}

/// How the product of a new item is designated
#[derive(Debug, Clone)]
pub enum ProductRef {
    Id(ProductId),
    /// A scanned EAN/UPC barcode
    Barcode(String),
}

/// Input for adding an item
#[derive(Debug, Clone)]
pub struct AddItemInput {
    pub product: ProductRef,
    pub quantity: f64,
    pub expiry_date: Option<NaiveDate>,
    /// Defaults to the day the item is added
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Money>,
    pub storage_location: Option<StorageLocation>,
    pub notes: Option<String>,
}

impl AddItemInput {
    pub fn new(product: ProductRef, quantity: f64) -> Self {
        Self {
            product,
            quantity,
            expiry_date: None,
            purchase_date: None,
            purchase_price: None,
            storage_location: None,
            notes: None,
        }
    }
}

/// Partial update of an item
///
/// `None` leaves a field unchanged; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateItemInput {
    pub quantity: Option<f64>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Option<Money>>,
    pub storage_location: Option<Option<StorageLocation>>,
    pub notes: Option<Option<String>>,
}

/// Result of consuming part of an item
#[derive(Debug, Clone)]
pub enum ConsumeOutcome {
    /// Some quantity is left
    Remaining(InventoryItem),
    /// Nothing left; the item was removed
    Finished(InventoryItem),
}

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub status: Option<ExpiryStatus>,
    pub location: Option<StorageLocation>,
    pub product_id: Option<ProductId>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ExpiryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn location(mut self, location: StorageLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSort {
    /// Soonest expiry first, undated last
    #[default]
    Expiry,
    /// Most recent purchase first
    Purchase,
    /// Product name
    Name,
}

/// An inventory item joined with its product and derived presentation fields
#[derive(Debug, Clone, Serialize)]
pub struct InventoryView {
    pub item: InventoryItem,
    pub product: Option<Product>,
    pub status: ExpiryStatus,
    pub days_until_expiry: Option<i64>,
    /// "Périme demain", "Expiré depuis 3 jours", ...
    pub relative_expiry: String,
    /// "2 unités", "1.5 kg", ...
    pub quantity_label: String,
}

impl InventoryView {
    pub fn new(item: InventoryItem, product: Option<Product>, today: NaiveDate) -> Self {
        let unit = product
            .as_ref()
            .map(|p| p.unit_type)
            .unwrap_or(UnitType::Unit);

        Self {
            status: item.expiry_status(today),
            days_until_expiry: item.days_until_expiry(today),
            relative_expiry: expiry::format_relative(item.expiry_date, today),
            quantity_label: format::format_quantity(item.quantity, unit),
            product,
            item,
        }
    }

    pub fn product_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("(produit supprimé)")
    }
}

impl<'a> InventoryService<'a> {
    /// Service acting on behalf of `user_id`
    pub fn new(storage: &'a Storage, user_id: UserId) -> Self {
        Self { storage, user_id }
    }

    /// Add an item; `today` is the default purchase date
    pub fn add(&self, input: AddItemInput, today: NaiveDate) -> PantryResult<InventoryItem> {
        let product = self.resolve_product(&input.product)?;

        let mut item = InventoryItem::new(
            self.user_id,
            product.id,
            input.quantity,
            input.purchase_date.unwrap_or(today),
        );
        item.expiry_date = input.expiry_date;
        item.purchase_price = input.purchase_price;
        item.storage_location = input.storage_location;
        item.notes = input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        item.validate()
            .map_err(|e| PantryError::Validation(e.to_string()))?;

        self.storage.inventory.upsert(item.clone())?;
        self.storage.inventory.save()?;

        self.storage.log_create(
            EntityType::InventoryItem,
            item.id.to_string(),
            Some(product.name.clone()),
            &item,
        )?;

        tracing::info!(item = %item.id, product = %product.id, "added inventory item");
        Ok(item)
    }

    pub fn get(&self, id: ItemId) -> PantryResult<Option<InventoryItem>> {
        self.storage.inventory.get(id)
    }

    /// Find an item by full or shortened id
    pub fn find(&self, identifier: &str) -> PantryResult<Option<InventoryItem>> {
        if let Ok(id) = identifier.parse::<ItemId>() {
            return self.storage.inventory.get(id);
        }

        resolve_short(self.storage.inventory.get_all()?, identifier, |i, s| {
            i.id.matches_short(s)
        })
    }

    pub fn require(&self, identifier: &str) -> PantryResult<InventoryItem> {
        self.find(identifier)?
            .ok_or_else(|| PantryError::item_not_found(identifier))
    }

    /// Update an item
    pub fn update(&self, id: ItemId, input: UpdateItemInput) -> PantryResult<InventoryItem> {
        let mut item = self
            .storage
            .inventory
            .get(id)?
            .ok_or_else(|| PantryError::item_not_found(id.to_string()))?;

        let before = item.clone();

        if let Some(quantity) = input.quantity {
            item.quantity = quantity;
        }
        if let Some(expiry_date) = input.expiry_date {
            item.expiry_date = expiry_date;
        }
        if let Some(purchase_date) = input.purchase_date {
            item.purchase_date = purchase_date;
        }
        if let Some(price) = input.purchase_price {
            item.purchase_price = price;
        }
        if let Some(location) = input.storage_location {
            item.storage_location = location;
        }
        if let Some(notes) = input.notes {
            item.notes = notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
        }

        item.touch();
        item.validate()
            .map_err(|e| PantryError::Validation(e.to_string()))?;

        self.storage.inventory.upsert(item.clone())?;
        self.storage.inventory.save()?;

        self.storage.log_update(
            EntityType::InventoryItem,
            item.id.to_string(),
            self.product_name(item.product_id)?,
            &before,
            &item,
        )?;

        Ok(item)
    }

    /// Use up `amount` of an item, removing it once nothing is left
    pub fn consume(&self, id: ItemId, amount: f64) -> PantryResult<ConsumeOutcome> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PantryError::Validation(format!(
                "Consumed quantity must be positive (got {})",
                amount
            )));
        }

        let item = self
            .storage
            .inventory
            .get(id)?
            .ok_or_else(|| PantryError::item_not_found(id.to_string()))?;

        let remaining = item.quantity - amount;
        if remaining <= f64::EPSILON {
            let removed = self.delete(id)?;
            return Ok(ConsumeOutcome::Finished(removed));
        }

        let updated = self.update(
            id,
            UpdateItemInput {
                quantity: Some(remaining),
                ..Default::default()
            },
        )?;
        Ok(ConsumeOutcome::Remaining(updated))
    }

    /// Remove an item from the inventory
    pub fn delete(&self, id: ItemId) -> PantryResult<InventoryItem> {
        let item = self
            .storage
            .inventory
            .get(id)?
            .ok_or_else(|| PantryError::item_not_found(id.to_string()))?;

        self.storage.inventory.delete(id)?;
        self.storage.inventory.save()?;

        self.storage.log_delete(
            EntityType::InventoryItem,
            item.id.to_string(),
            self.product_name(item.product_id)?,
            &item,
        )?;

        Ok(item)
    }

    /// The user's items as views, filtered and sorted
    pub fn list(
        &self,
        filter: &ItemFilter,
        sort: ItemSort,
        today: NaiveDate,
    ) -> PantryResult<Vec<InventoryView>> {
        let mut views: Vec<InventoryView> = self
            .views(today)?
            .into_iter()
            .filter(|v| filter.status.map_or(true, |s| v.status == s))
            .filter(|v| {
                filter
                    .location
                    .map_or(true, |l| v.item.storage_location == Some(l))
            })
            .filter(|v| filter.product_id.map_or(true, |p| v.item.product_id == p))
            .collect();

        match sort {
            // Views arrive most recent purchase first
            ItemSort::Purchase => {}
            ItemSort::Expiry => expiry::sort_by_expiry(&mut views, |v| v.item.expiry_date),
            ItemSort::Name => views.sort_by_key(|v| v.product_name().to_lowercase()),
        }

        Ok(views)
    }

    /// All of the user's items as views, most recent purchase first
    pub fn views(&self, today: NaiveDate) -> PantryResult<Vec<InventoryView>> {
        let items = self.storage.inventory.get_by_user(self.user_id)?;
        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let product = self.storage.products.get(item.product_id)?;
            views.push(InventoryView::new(item, product, today));
        }
        Ok(views)
    }

    pub fn view(&self, item: InventoryItem, today: NaiveDate) -> PantryResult<InventoryView> {
        let product = self.storage.products.get(item.product_id)?;
        Ok(InventoryView::new(item, product, today))
    }

    fn resolve_product(&self, product: &ProductRef) -> PantryResult<Product> {
        match product {
            ProductRef::Id(id) => self
                .storage
                .products
                .get(*id)?
                .ok_or_else(|| PantryError::product_not_found(id.to_string())),
            ProductRef::Barcode(code) => self
                .storage
                .products
                .find_by_barcode(code)?
                .ok_or_else(|| PantryError::product_not_found(code.clone())),
        }
    }

    fn product_name(&self, id: ProductId) -> PantryResult<Option<String>> {
        Ok(self.storage.products.get(id)?.map(|p| p.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn product(storage: &Storage, name: &str, unit: UnitType, barcode: Option<&str>) -> Product {
        let mut product = Product::new(name, unit);
        product.barcode = barcode.map(str::to_string);
        storage.products.upsert(product.clone()).unwrap();
        product
    }

    #[test]
    fn test_add_by_barcode_defaults_purchase_date() {
        let (_temp_dir, storage) = create_test_storage();
        let yogurt = product(&storage, "Yaourt", UnitType::Unit, Some("12345678"));
        let service = InventoryService::new(&storage, UserId::new());

        let item = service
            .add(
                AddItemInput::new(ProductRef::Barcode("12345678".into()), 4.0),
                today(),
            )
            .unwrap();

        assert_eq!(item.product_id, yogurt.id);
        assert_eq!(item.purchase_date, today());
    }

    #[test]
    fn test_add_unknown_product() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InventoryService::new(&storage, UserId::new());

        let err = service
            .add(
                AddItemInput::new(ProductRef::Barcode("00000000".into()), 1.0),
                today(),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_add_negative_quantity_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let rice = product(&storage, "Riz", UnitType::Kg, None);
        let service = InventoryService::new(&storage, UserId::new());

        let err = service
            .add(AddItemInput::new(ProductRef::Id(rice.id), -1.0), today())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let milk = product(&storage, "Lait", UnitType::L, None);
        let service = InventoryService::new(&storage, UserId::new());
        let mut input = AddItemInput::new(ProductRef::Id(milk.id), 1.0);
        input.expiry_date = Some(today());
        input.notes = Some("entamé".into());
        let item = service.add(input, today()).unwrap();

        let updated = service
            .update(
                item.id,
                UpdateItemInput {
                    expiry_date: Some(None),
                    notes: Some(None),
                    storage_location: Some(Some(StorageLocation::Fridge)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(updated.expiry_date.is_none());
        assert!(updated.notes.is_none());
        assert_eq!(updated.storage_location, Some(StorageLocation::Fridge));
    }

    #[test]
    fn test_consume_partial_then_all() {
        let (_temp_dir, storage) = create_test_storage();
        let eggs = product(&storage, "Oeufs", UnitType::Unit, None);
        let service = InventoryService::new(&storage, UserId::new());
        let item = service
            .add(AddItemInput::new(ProductRef::Id(eggs.id), 6.0), today())
            .unwrap();

        match service.consume(item.id, 2.0).unwrap() {
            ConsumeOutcome::Remaining(left) => assert_eq!(left.quantity, 4.0),
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert!(matches!(
            service.consume(item.id, 10.0).unwrap(),
            ConsumeOutcome::Finished(_)
        ));
        assert!(service.get(item.id).unwrap().is_none());
        assert!(service.consume(item.id, 1.0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_consume_rejects_non_positive_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let eggs = product(&storage, "Oeufs", UnitType::Unit, None);
        let service = InventoryService::new(&storage, UserId::new());
        let item = service
            .add(AddItemInput::new(ProductRef::Id(eggs.id), 6.0), today())
            .unwrap();

        assert!(service.consume(item.id, 0.0).unwrap_err().is_validation());
    }

    #[test]
    fn test_list_filters_and_sorts_by_expiry() {
        let (_temp_dir, storage) = create_test_storage();
        let milk = product(&storage, "Lait", UnitType::L, None);
        let service = InventoryService::new(&storage, UserId::new());

        for days in [Some(10), None, Some(1), Some(5)] {
            let mut input = AddItemInput::new(ProductRef::Id(milk.id), 1.0);
            input.expiry_date = days.map(|d| today() + Duration::days(d));
            input.storage_location = Some(StorageLocation::Fridge);
            service.add(input, today()).unwrap();
        }

        let all = service
            .list(&ItemFilter::new(), ItemSort::Expiry, today())
            .unwrap();
        let statuses: Vec<_> = all.iter().map(|v| v.status).collect();
        assert_eq!(
            statuses,
            vec![
                ExpiryStatus::Critical,
                ExpiryStatus::Warning,
                ExpiryStatus::Good,
                ExpiryStatus::Unknown
            ]
        );
        assert_eq!(all[0].relative_expiry, "Périme demain");
        assert_eq!(all[0].quantity_label, "1 L");

        let critical = service
            .list(
                &ItemFilter::new().status(ExpiryStatus::Critical),
                ItemSort::Expiry,
                today(),
            )
            .unwrap();
        assert_eq!(critical.len(), 1);

        let freezer = service
            .list(
                &ItemFilter::new().location(StorageLocation::Freezer),
                ItemSort::Expiry,
                today(),
            )
            .unwrap();
        assert!(freezer.is_empty());
    }

    #[test]
    fn test_views_recompute_status() {
        let (_temp_dir, storage) = create_test_storage();
        let milk = product(&storage, "Lait", UnitType::L, None);
        let service = InventoryService::new(&storage, UserId::new());
        let mut input = AddItemInput::new(ProductRef::Id(milk.id), 1.0);
        input.expiry_date = Some(today() + Duration::days(3));
        service.add(input, today()).unwrap();

        let now = service.views(today()).unwrap();
        let later = service.views(today() + Duration::days(4)).unwrap();
        assert_eq!(now[0].status, ExpiryStatus::Warning);
        assert_eq!(later[0].status, ExpiryStatus::Expired);
    }

    #[test]
    fn test_other_users_items_hidden() {
        let (_temp_dir, storage) = create_test_storage();
        let milk = product(&storage, "Lait", UnitType::L, None);
        InventoryService::new(&storage, UserId::new())
            .add(AddItemInput::new(ProductRef::Id(milk.id), 1.0), today())
            .unwrap();

        let mine = InventoryService::new(&storage, UserId::new());
        assert!(mine.views(today()).unwrap().is_empty());
    }
}
