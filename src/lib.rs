//! PantryCLI - Terminal-based grocery inventory, expiry and budget tracker
//!
//! This library provides the core functionality for the PantryCLI application:
//! tracking what is in the kitchen, what is about to expire, how healthy the
//! stock is, and how much of the monthly grocery budget is left.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `expiry`, `score`, `format`: pure domain rules (expiry buckets,
//!   Nutri/Eco/NOVA score normalization, locale-aware formatting)
//! - `models`: Core data models (products, inventory items, budgets, expenses)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `polling`: Receipt processing status polling
//! - `display`, `cli`, `tui`, `export`: user-facing surfaces
//!
//! # Example
//!
//! ```rust,ignore
//! use pantry_cli::config::{paths::PantryPaths, settings::Settings};
//!
//! let paths = PantryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod expiry;
pub mod export;
pub mod format;
pub mod models;
pub mod polling;
pub mod score;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{PantryError, PantryResult};
