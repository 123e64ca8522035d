//! Product CLI commands
//!
//! Implements CLI commands for catalogue management.

use clap::Subcommand;

use crate::display::{format_product_details, format_product_list};
use crate::error::{PantryError, PantryResult};
use crate::models::UnitType;
use crate::score::{Grade, NovaGroup};
use crate::services::{CreateProductInput, ProductService, UpdateProductInput};
use crate::storage::Storage;

use super::{clearable, clearable_with};

/// Product subcommands
#[derive(Subcommand)]
pub enum ProductCommands {
    /// Add a product to the catalogue
    Add {
        /// Product name
        name: String,
        /// Brand
        #[arg(short, long)]
        brand: Option<String>,
        /// Shelf category (e.g., "Produits laitiers")
        #[arg(short, long)]
        category: Option<String>,
        /// EAN-8, UPC-A or EAN-13 barcode
        #[arg(long)]
        barcode: Option<String>,
        /// Nutri-Score letter (A-E)
        #[arg(long)]
        nutri: Option<String>,
        /// Eco-Score letter (A-E)
        #[arg(long)]
        eco: Option<String>,
        /// NOVA group (1-4)
        #[arg(long)]
        nova: Option<String>,
        /// Unit quantities are counted in (unit, kg, g, l, ml)
        #[arg(short, long, default_value = "unit")]
        unit: String,
    },
    /// List all products
    List,
    /// Show product details
    Show {
        /// Product barcode, name or ID
        product: String,
    },
    /// Edit a product ("none" clears an optional field)
    Edit {
        /// Product barcode, name or ID
        product: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        brand: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        barcode: Option<String>,
        #[arg(long)]
        nutri: Option<String>,
        #[arg(long)]
        eco: Option<String>,
        #[arg(long)]
        nova: Option<String>,
        #[arg(short, long)]
        unit: Option<String>,
    },
    /// Delete a product
    Delete {
        /// Product barcode, name or ID
        product: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_grade(s: &str) -> PantryResult<Grade> {
    s.parse::<Grade>()
        .map_err(|e| PantryError::Validation(e.to_string()))
}

fn parse_nova(s: &str) -> PantryResult<NovaGroup> {
    s.parse::<NovaGroup>()
        .map_err(|e| PantryError::Validation(e.to_string()))
}

fn parse_unit(s: &str) -> PantryResult<UnitType> {
    s.parse::<UnitType>().map_err(PantryError::Validation)
}

/// Handle a product command
pub fn handle_product_command(storage: &Storage, cmd: ProductCommands) -> PantryResult<()> {
    let service = ProductService::new(storage);

    match cmd {
        ProductCommands::Add {
            name,
            brand,
            category,
            barcode,
            nutri,
            eco,
            nova,
            unit,
        } => {
            let input = CreateProductInput {
                name,
                brand,
                category,
                barcode,
                nutriscore: nutri.as_deref().map(parse_grade).transpose()?,
                ecoscore: eco.as_deref().map(parse_grade).transpose()?,
                nova_group: nova.as_deref().map(parse_nova).transpose()?,
                unit_type: parse_unit(&unit)?,
            };

            let product = service.create(input)?;
            println!("Created product: {} ({})", product.name, product.id);
        }

        ProductCommands::List => {
            let products = service.list()?;
            println!("{}", format_product_list(&products));
            if !products.is_empty() {
                println!("\nTotal: {} products", products.len());
            }
        }

        ProductCommands::Show { product } => {
            let product = service.require(&product)?;
            let item_count = storage.inventory.get_by_product(product.id)?.len();
            print!("{}", format_product_details(&product, item_count));
        }

        ProductCommands::Edit {
            product,
            name,
            brand,
            category,
            barcode,
            nutri,
            eco,
            nova,
            unit,
        } => {
            let product = service.require(&product)?;

            let input = UpdateProductInput {
                name,
                brand: clearable(brand),
                category: clearable(category),
                barcode: clearable(barcode),
                nutriscore: clearable_with(nutri, parse_grade)?,
                ecoscore: clearable_with(eco, parse_grade)?,
                nova_group: clearable_with(nova, parse_nova)?,
                unit_type: unit.as_deref().map(parse_unit).transpose()?,
            };

            let updated = service.update(product.id, input)?;
            println!("Updated product: {}", updated.name);
        }

        ProductCommands::Delete { product, force } => {
            let product = service.require(&product)?;

            if !force {
                println!("About to delete product: {}", product.name);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(product.id)?;
            println!("Deleted product: {}", deleted.name);
        }
    }

    Ok(())
}
