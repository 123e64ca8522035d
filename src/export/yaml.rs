//! YAML Export functionality
//!
//! Exports the complete database to YAML format for human-readable backup.

use std::io::Write;

use crate::error::{PantryError, PantryResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> PantryError {
    PantryError::Export(e.to_string())
}

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> PantryResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# PantryCLI Full Database Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)?;

    tracing::info!(
        products = export.metadata.product_count,
        items = export.metadata.item_count,
        "exported database as YAML"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use crate::models::{Product, UnitType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export() {
        let (_temp_dir, storage) = create_test_storage();
        let mut product = Product::new("Riz basmati", UnitType::Kg);
        product.barcode = Some("3017620422003".into());
        storage.products.upsert(product).unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# PantryCLI Full Database Export"));
        assert!(yaml.contains("Riz basmati"));

        // Comments are ignored by the parser
        let parsed: FullExport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.products.len(), 1);
        assert_eq!(parsed.products[0].unit_type, UnitType::Kg);
        assert!(parsed.validate().is_ok());
    }
}
