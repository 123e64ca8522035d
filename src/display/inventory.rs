//! Inventory display formatting

use tabled::Tabled;

use crate::config::settings::Settings;
use crate::format::format_date;
use crate::services::InventoryView;

use super::{money, or_dash, table};

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Produit")]
    product: String,
    #[tabled(rename = "Quantité")]
    quantity: String,
    #[tabled(rename = "Statut")]
    status: String,
    #[tabled(rename = "Péremption")]
    expiry: String,
    #[tabled(rename = "Emplacement")]
    location: String,
}

/// Format inventory views as a table
pub fn format_item_list(views: &[InventoryView]) -> String {
    if views.is_empty() {
        return "No items found.".to_string();
    }

    let rows = views
        .iter()
        .map(|v| ItemRow {
            id: v.item.id.to_string(),
            product: v.product_name().to_string(),
            quantity: v.quantity_label.clone(),
            status: v.status.label().to_string(),
            expiry: v.relative_expiry.clone(),
            location: v
                .item
                .storage_location
                .map(|l| l.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    table(rows)
}

/// Format a single item's details
pub fn format_item_details(view: &InventoryView, settings: &Settings) -> String {
    let item = &view.item;
    let mut output = String::new();

    output.push_str(&format!("Item: {}\n", view.product_name()));
    output.push_str(&format!("  ID:          {}\n", item.id));
    output.push_str(&format!("  Quantity:    {}\n", view.quantity_label));
    output.push_str(&format!("  Status:      {}\n", view.status));
    output.push_str(&format!("  Expiry:      {}\n", view.relative_expiry));
    output.push_str(&format!(
        "  Purchased:   {}\n",
        format_date(item.purchase_date, settings.locale)
    ));
    output.push_str(&format!(
        "  Price:       {}\n",
        item.purchase_price
            .map(|p| money(settings, p))
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!(
        "  Location:    {}\n",
        item.storage_location
            .map(|l| l.label().to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!("  Notes:       {}\n", or_dash(item.notes.as_deref())));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::ExpiryStatus;
    use crate::models::{InventoryItem, Money, Product, StorageLocation, UnitType, UserId};
    use chrono::NaiveDate;

    fn view() -> InventoryView {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let product = Product::new("Yaourt", UnitType::Unit);
        let mut item = InventoryItem::new(UserId::new(), product.id, 4.0, today);
        item.expiry_date = NaiveDate::from_ymd_opt(2025, 3, 11);
        item.storage_location = Some(StorageLocation::Fridge);
        item.purchase_price = Some(Money::from_cents(289));
        InventoryView::new(item, Some(product), today)
    }

    #[test]
    fn test_list() {
        let v = view();
        assert_eq!(v.status, ExpiryStatus::Critical);

        let output = format_item_list(&[v]);
        assert!(output.contains("Yaourt"));
        assert!(output.contains("4 unités"));
        assert!(output.contains("Périme demain"));
        assert!(output.contains("Réfrigérateur"));
    }

    #[test]
    fn test_details_use_locale() {
        let settings = Settings::default();
        let output = format_item_details(&view(), &settings);
        assert!(output.contains("Purchased:   10/03/2025"));
        assert!(output.contains("Price:       2,89\u{A0}€"));
        assert!(output.contains("Notes:       -"));
    }
}
