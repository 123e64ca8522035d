//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{PantryError, PantryResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Data written by a CSV export
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CsvData {
    /// Inventory items with expiry status
    Inventory,
    /// Product catalogue
    Products,
    /// Budget expenses
    Expenses,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the full database to JSON
    Json {
        /// Output file path
        output: PathBuf,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export the full database to YAML
    Yaml {
        /// Output file path
        output: PathBuf,
    },

    /// Export one collection to CSV
    Csv {
        /// Output file path
        output: PathBuf,
        /// Collection to export
        #[arg(short, long, value_enum, default_value = "inventory")]
        data: CsvData,
    },
}

fn create_writer(output: &PathBuf) -> PantryResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        PantryError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> PantryResult<()> {
    writer
        .flush()
        .map_err(|e| PantryError::Export(e.to_string()))
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> PantryResult<()> {
    match cmd {
        ExportCommands::Json { output, pretty } => {
            let mut writer = create_writer(&output)?;
            json::export_full_json(storage, &mut writer, pretty)?;
            finish(writer)?;
            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Yaml { output } => {
            let mut writer = create_writer(&output)?;
            yaml::export_full_yaml(storage, &mut writer)?;
            finish(writer)?;
            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Csv { output, data } => {
            let mut writer = create_writer(&output)?;
            let count = match data {
                CsvData::Inventory => csv::export_inventory_csv(
                    storage,
                    settings.user_id,
                    settings.today(),
                    &mut writer,
                )?,
                CsvData::Products => csv::export_products_csv(storage, &mut writer)?,
                CsvData::Expenses => csv::export_expenses_csv(storage, &mut writer)?,
            };
            finish(writer)?;
            println!("Exported {} rows to: {}", count, output.display());
        }
    }

    Ok(())
}
