//! Inventory item model
//!
//! An inventory item is a quantity of a product the user currently holds,
//! with its purchase and expiry dates. Its expiry status is never stored; it
//! is recomputed from `expiry_date` on every read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{ItemId, ProductId, UserId};
use super::money::Money;
use crate::expiry::{self, ExpiryStatus};

/// Where an item is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageLocation {
    Fridge,
    Freezer,
    Pantry,
    Other,
}

impl StorageLocation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fridge => "Réfrigérateur",
            Self::Freezer => "Congélateur",
            Self::Pantry => "Placard",
            Self::Other => "Autre",
        }
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for StorageLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fridge" | "frigo" | "réfrigérateur" | "refrigerateur" => Ok(Self::Fridge),
            "freezer" | "congélateur" | "congelateur" => Ok(Self::Freezer),
            "pantry" | "placard" | "cupboard" => Ok(Self::Pantry),
            "other" | "autre" => Ok(Self::Other),
            other => Err(format!(
                "Unknown storage location: {} (expected fridge, freezer, pantry, other)",
                other
            )),
        }
    }
}

/// A product held in the user's inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,

    pub user_id: UserId,

    pub product_id: ProductId,

    /// Quantity in the product's unit (never negative)
    pub quantity: f64,

    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,

    pub purchase_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<StorageLocation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        user_id: UserId,
        product_id: ProductId,
        quantity: f64,
        purchase_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            user_id,
            product_id,
            quantity,
            expiry_date: None,
            purchase_date,
            purchase_price: None,
            storage_location: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Freshness bucket as of `today`
    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        expiry::classify(self.expiry_date, today)
    }

    /// Days left before expiry as of `today`, if the item has a date
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|date| expiry::days_until(date, today))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the item
    pub fn validate(&self) -> Result<(), InventoryValidationError> {
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(InventoryValidationError::InvalidQuantity(self.quantity));
        }

        if let Some(price) = self.purchase_price {
            if price.is_negative() {
                return Err(InventoryValidationError::NegativePrice);
            }
        }

        if let Some(notes) = &self.notes {
            if notes.len() > 500 {
                return Err(InventoryValidationError::NotesTooLong(notes.len()));
            }
        }

        Ok(())
    }
}

/// Validation errors for inventory items
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryValidationError {
    InvalidQuantity(f64),
    NegativePrice,
    NotesTooLong(usize),
}

impl fmt::Display for InventoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuantity(q) => write!(f, "Quantity must be zero or more (got {})", q),
            Self::NegativePrice => write!(f, "Purchase price cannot be negative"),
            Self::NotesTooLong(len) => write!(f, "Notes too long ({} chars, max 500)", len),
        }
    }
}

impl std::error::Error for InventoryValidationError {}
