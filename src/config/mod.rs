//! Configuration module for PantryCLI
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence (locale, currency, timezone, polling)

pub mod paths;
pub mod settings;

pub use paths::PantryPaths;
pub use settings::Settings;
