//! CSV Export functionality
//!
//! Exports inventory, the product catalogue and expenses to CSV. Amounts are
//! written as plain decimals so spreadsheets can sum them.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{PantryError, PantryResult};
use crate::models::{Money, UserId};
use crate::services::InventoryService;
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> PantryError {
    PantryError::Export(e.to_string())
}

fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.cents() as f64 / 100.0)
}

fn write_rows<W, R>(writer: &mut W, rows: impl IntoIterator<Item = R>) -> PantryResult<usize>
where
    W: Write,
    R: Serialize,
{
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    let mut count = 0;
    for row in rows {
        csv_writer.serialize(row).map_err(export_err)?;
        count += 1;
    }
    csv_writer.flush().map_err(export_err)?;
    Ok(count)
}

#[derive(Serialize)]
struct InventoryRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Barcode")]
    barcode: String,
    #[serde(rename = "Quantity")]
    quantity: f64,
    #[serde(rename = "Unit")]
    unit: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Expiry Date")]
    expiry_date: String,
    #[serde(rename = "Days Left")]
    days_left: Option<i64>,
    #[serde(rename = "Purchase Date")]
    purchase_date: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Notes")]
    notes: String,
}

#[derive(Serialize)]
struct ProductRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Barcode")]
    barcode: String,
    #[serde(rename = "Nutri-Score")]
    nutriscore: String,
    #[serde(rename = "Eco-Score")]
    ecoscore: String,
    #[serde(rename = "NOVA")]
    nova: Option<u8>,
    #[serde(rename = "Unit")]
    unit: String,
}

#[derive(Serialize)]
struct ExpenseRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Budget ID")]
    budget_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Receipt ID")]
    receipt_id: String,
}

/// Export a user's inventory with expiry status as of `today`
pub fn export_inventory_csv<W: Write>(
    storage: &Storage,
    user_id: UserId,
    today: NaiveDate,
    writer: &mut W,
) -> PantryResult<usize> {
    let views = InventoryService::new(storage, user_id).views(today)?;

    let rows = views.into_iter().map(|view| {
        let product = view.product.as_ref();
        InventoryRow {
            id: view.item.id.to_string(),
            product: view.product_name().to_string(),
            barcode: product.and_then(|p| p.barcode.clone()).unwrap_or_default(),
            quantity: view.item.quantity,
            unit: product
                .map(|p| p.unit_type.to_string())
                .unwrap_or_default(),
            status: format!("{:?}", view.status).to_uppercase(),
            expiry_date: view
                .item
                .expiry_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            days_left: view.days_until_expiry,
            purchase_date: view.item.purchase_date.to_string(),
            price: view.item.purchase_price.map(decimal).unwrap_or_default(),
            location: view
                .item
                .storage_location
                .map(|l| l.label().to_string())
                .unwrap_or_default(),
            notes: view.item.notes.clone().unwrap_or_default(),
        }
    });

    write_rows(writer, rows)
}

/// Export the product catalogue
pub fn export_products_csv<W: Write>(storage: &Storage, writer: &mut W) -> PantryResult<usize> {
    let rows = storage.products.get_all()?.into_iter().map(|p| ProductRow {
        id: p.id.to_string(),
        name: p.name,
        brand: p.brand.unwrap_or_default(),
        category: p.category.unwrap_or_default(),
        barcode: p.barcode.unwrap_or_default(),
        nutriscore: p.nutriscore.map(|g| g.to_string()).unwrap_or_default(),
        ecoscore: p.ecoscore.map(|g| g.to_string()).unwrap_or_default(),
        nova: p.nova_group.map(|g| g.group_number()),
        unit: p.unit_type.to_string(),
    });

    write_rows(writer, rows)
}

/// Export every expense, oldest first
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: &mut W) -> PantryResult<usize> {
    let mut expenses = storage.expenses.get_all()?;
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

    let rows = expenses.into_iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        budget_id: e.budget_id.to_string(),
        date: e.date.to_string(),
        amount: decimal(e.amount),
        source: e.source.unwrap_or_default(),
        receipt_id: e.receipt_id.map(|r| r.to_string()).unwrap_or_default(),
    });

    write_rows(writer, rows)
}
