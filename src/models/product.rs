//! Product model
//!
//! A product is the catalogue entry an inventory item points to: name, brand,
//! barcode, nutrition/ecology scores and the unit its quantities are counted in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ProductId;
use crate::score::{Grade, NovaGroup, Score};

/// Unit a product's quantities are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitType {
    /// Countable pieces
    #[default]
    Unit,
    Kg,
    G,
    L,
    Ml,
}

impl UnitType {
    pub const ALL: [UnitType; 5] = [
        UnitType::Unit,
        UnitType::Kg,
        UnitType::G,
        UnitType::L,
        UnitType::Ml,
    ];
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::unit_label(*self, 1.0))
    }
}

impl FromStr for UnitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unit" | "units" | "unite" | "unité" | "unités" | "u" => Ok(Self::Unit),
            "kg" => Ok(Self::Kg),
            "g" => Ok(Self::G),
            "l" => Ok(Self::L),
            "ml" => Ok(Self::Ml),
            other => Err(format!("Unknown unit: {} (expected unit, kg, g, l, ml)", other)),
        }
    }
}

/// A catalogue product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Product name (e.g., "Yaourt nature")
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Shelf category (e.g., "Produits laitiers")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// EAN-8, UPC-A or EAN-13 barcode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    #[serde(default)]
    pub nutriscore: Option<Grade>,

    #[serde(default)]
    pub ecoscore: Option<Grade>,

    #[serde(default)]
    pub nova_group: Option<NovaGroup>,

    #[serde(default)]
    pub unit_type: UnitType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product without scores
    pub fn new(name: impl Into<String>, unit_type: UnitType) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name: name.into(),
            brand: None,
            category: None,
            barcode: None,
            nutriscore: None,
            ecoscore: None,
            nova_group: None,
            unit_type,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn nutri_score(&self) -> Option<Score> {
        self.nutriscore.map(Score::Letter)
    }

    pub fn eco_score(&self) -> Option<Score> {
        self.ecoscore.map(Score::Letter)
    }

    pub fn nova_score(&self) -> Option<Score> {
        self.nova_group.map(Score::Nova)
    }

    /// Mark the product as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the product
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ProductValidationError::NameTooLong(self.name.len()));
        }

        if let Some(barcode) = &self.barcode {
            let valid_length = matches!(barcode.len(), 8 | 12 | 13);
            if !valid_length || !barcode.chars().all(|c| c.is_ascii_digit()) {
                return Err(ProductValidationError::InvalidBarcode(barcode.clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.brand {
            Some(brand) => write!(f, "{} ({})", self.name, brand),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Validation errors for products
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidBarcode(String),
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Product name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Product name too long ({} chars, max 100)", len)
            }
            Self::InvalidBarcode(code) => {
                write!(f, "Invalid barcode '{}' (expected 8, 12 or 13 digits)", code)
            }
        }
    }
}

impl std::error::Error for ProductValidationError {}
