//! Export module for PantryCLI
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: inventory, products and expenses (spreadsheet-compatible)
//! - JSON: machine-readable full database export
//! - YAML: human-readable full database export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_expenses_csv, export_inventory_csv, export_products_csv};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
