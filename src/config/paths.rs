//! Path management for PantryCLI
//!
//! Provides platform-aware path resolution for configuration, data, and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `PANTRY_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/pantry-cli` on Linux, `%APPDATA%\pantry-cli\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::PantryError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "PANTRY_CLI_DATA_DIR";

/// Manages all paths used by PantryCLI
#[derive(Debug, Clone)]
pub struct PantryPaths {
    /// Base directory for all PantryCLI data
    base_dir: PathBuf,
}

impl PantryPaths {
    /// Create a new PantryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PantryError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PantryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn products_file(&self) -> PathBuf {
        self.data_dir().join("products.json")
    }

    pub fn inventory_file(&self) -> PathBuf {
        self.data_dir().join("inventory.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PantryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PantryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PantryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if PantryCLI has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, PantryError> {
    ProjectDirs::from("", "", "pantry-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PantryError::Config("Could not determine home directory".into()))
}
