//! Inventory item CLI commands

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_item_details, format_item_list};
use crate::error::{PantryError, PantryResult};
use crate::expiry::ExpiryStatus;
use crate::format::format_quantity;
use crate::models::{StorageLocation, UnitType};
use crate::services::{
    AddItemInput, ConsumeOutcome, InventoryService, ItemFilter, ItemSort, ProductRef,
    ProductService, UpdateItemInput,
};
use crate::storage::Storage;

use super::{clearable, clearable_with, parse_date, parse_money, parse_quantity};

/// Expiry status filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Expired,
    Critical,
    Warning,
    Good,
    Unknown,
}

impl From<StatusArg> for ExpiryStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Expired => ExpiryStatus::Expired,
            StatusArg::Critical => ExpiryStatus::Critical,
            StatusArg::Warning => ExpiryStatus::Warning,
            StatusArg::Good => ExpiryStatus::Good,
            StatusArg::Unknown => ExpiryStatus::Unknown,
        }
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Expiry,
    Purchase,
    Name,
}

impl From<SortArg> for ItemSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Expiry => ItemSort::Expiry,
            SortArg::Purchase => ItemSort::Purchase,
            SortArg::Name => ItemSort::Name,
        }
    }
}

/// Item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an item to the inventory
    Add {
        /// Product name, ID or scanned barcode
        product: String,
        /// Quantity in the product's unit
        #[arg(default_value = "1")]
        quantity: String,
        /// Expiry date (YYYY-MM-DD)
        #[arg(short, long)]
        expires: Option<String>,
        /// Purchase date (defaults to today)
        #[arg(short, long)]
        purchased: Option<String>,
        /// Purchase price (e.g., "2,49")
        #[arg(long)]
        price: Option<String>,
        /// Storage location (fridge, freezer, pantry, other)
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List inventory items
    List {
        /// Only items with this expiry status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
        /// Only items stored here
        #[arg(short, long)]
        location: Option<String>,
        /// Only items of this product
        #[arg(short, long)]
        product: Option<String>,
        /// Sort order
        #[arg(long, value_enum, default_value = "expiry")]
        sort: SortArg,
    },
    /// Show item details
    Show {
        /// Item ID
        item: String,
    },
    /// Edit an item ("none" clears an optional field)
    Edit {
        /// Item ID
        item: String,
        #[arg(short, long)]
        quantity: Option<String>,
        #[arg(short, long)]
        expires: Option<String>,
        #[arg(short, long)]
        purchased: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Use up part of an item
    Consume {
        /// Item ID
        item: String,
        /// Quantity consumed
        #[arg(default_value = "1")]
        amount: String,
    },
    /// Remove an item
    Delete {
        /// Item ID
        item: String,
    },
}

fn parse_location(s: &str) -> PantryResult<StorageLocation> {
    s.parse::<StorageLocation>().map_err(PantryError::Validation)
}

/// Barcodes are 8 to 13 digits; anything else is a name or id
fn looks_like_barcode(s: &str) -> bool {
    (8..=13).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}

/// Handle an inventory item command
pub fn handle_item_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ItemCommands,
) -> PantryResult<()> {
    let service = InventoryService::new(storage, settings.user_id);
    let products = ProductService::new(storage);
    let today = settings.today();

    match cmd {
        ItemCommands::Add {
            product,
            quantity,
            expires,
            purchased,
            price,
            location,
            notes,
        } => {
            let product_ref = if looks_like_barcode(&product) {
                ProductRef::Barcode(product)
            } else {
                ProductRef::Id(products.require(&product)?.id)
            };

            let mut input = AddItemInput::new(product_ref, parse_quantity(&quantity)?);
            input.expiry_date = expires.map(|d| parse_date(&d, settings)).transpose()?;
            input.purchase_date = purchased.map(|d| parse_date(&d, settings)).transpose()?;
            input.purchase_price = price.as_deref().map(parse_money).transpose()?;
            input.storage_location = location.as_deref().map(parse_location).transpose()?;
            input.notes = notes;

            let item = service.add(input, today)?;
            let view = service.view(item, today)?;
            println!(
                "Added {} of {} ({})",
                view.quantity_label,
                view.product_name(),
                view.item.id
            );
            println!("  {}", view.relative_expiry);
        }

        ItemCommands::List {
            status,
            location,
            product,
            sort,
        } => {
            let mut filter = ItemFilter::new();
            if let Some(status) = status {
                filter = filter.status(status.into());
            }
            if let Some(location) = location {
                filter = filter.location(parse_location(&location)?);
            }
            if let Some(product) = product {
                filter = filter.product(products.require(&product)?.id);
            }

            let views = service.list(&filter, sort.into(), today)?;
            println!("{}", format_item_list(&views));
            if !views.is_empty() {
                println!("\nTotal: {} items", views.len());
            }
        }

        ItemCommands::Show { item } => {
            let item = service.require(&item)?;
            let view = service.view(item, today)?;
            print!("{}", format_item_details(&view, settings));
        }

        ItemCommands::Edit {
            item,
            quantity,
            expires,
            purchased,
            price,
            location,
            notes,
        } => {
            let item = service.require(&item)?;

            let input = UpdateItemInput {
                quantity: quantity.as_deref().map(parse_quantity).transpose()?,
                expiry_date: clearable_with(expires, |d| parse_date(d, settings))?,
                purchase_date: purchased.map(|d| parse_date(&d, settings)).transpose()?,
                purchase_price: clearable_with(price, parse_money)?,
                storage_location: clearable_with(location, parse_location)?,
                notes: clearable(notes),
            };

            let updated = service.update(item.id, input)?;
            println!("Updated item: {}", updated.id);
        }

        ItemCommands::Consume { item, amount } => {
            let item = service.require(&item)?;
            let unit = products
                .get(item.product_id)?
                .map(|p| p.unit_type)
                .unwrap_or(UnitType::Unit);

            let amount = parse_quantity(&amount)?;

            match service.consume(item.id, amount)? {
                ConsumeOutcome::Remaining(item) => {
                    println!(
                        "Consumed {}; {} left",
                        format_quantity(amount, unit),
                        format_quantity(item.quantity, unit)
                    );
                }
                ConsumeOutcome::Finished(item) => {
                    println!("Finished item {}; removed from inventory", item.id);
                }
            }
        }

        ItemCommands::Delete { item } => {
            let item = service.require(&item)?;
            let deleted = service.delete(item.id)?;
            println!("Deleted item: {}", deleted.id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_barcode() {
        assert!(looks_like_barcode("3017620422003"));
        assert!(looks_like_barcode("96385074"));
        assert!(!looks_like_barcode("1234"));
        assert!(!looks_like_barcode("prd-1a2b3c4d"));
        assert!(!looks_like_barcode("Lait"));
    }
}
