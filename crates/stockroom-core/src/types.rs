//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewProduct    │   │    Product      │   │  ProductPatch   │       │
//! │  │  ─────────────  │──►│  ─────────────  │◄──│  ─────────────  │       │
//! │  │  raw form input │   │  id (UUID)      │   │  partial input  │       │
//! │  │  (text/number)  │   │  price: Money   │   │  Option<...>    │       │
//! │  └─────────────────┘   │  stock/minStock │   └─────────────────┘       │
//! │                        │  lastUpdated    │                              │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  PersistedAuth  │   │PersistedProducts│       │
//! │  │  username       │   │  { user }       │   │  { products }   │       │
//! │  │  isAuthenticated│   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Raw inputs carry [`NumericInput`] because values may arrive as text
//! (a form field, a CLI argument) or as a number (JSON). Conversion to
//! typed fields happens in one place: [`crate::validation`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Numeric Input
// =============================================================================

/// A numeric field as supplied by a caller, before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// A whole JSON number.
    Integer(i64),
    /// A fractional JSON number.
    Float(f64),
    /// Text, e.g. `"19.99"` from a form field.
    Text(String),
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Integer(n) => write!(f, "{}", n),
            NumericInput::Float(n) => write!(f, "{}", n),
            NumericInput::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        NumericInput::Integer(n)
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        NumericInput::Float(n)
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(s: String) -> Self {
        NumericInput::Text(s)
    }
}

// =============================================================================
// Product
// =============================================================================

/// One inventory item.
///
/// Only [`crate::store::ProductStore`] constructs and mutates products, so
/// every stored value has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4). Immutable after creation.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-form category label.
    pub category: String,

    /// Unit price (persisted as minor units).
    pub price: Money,

    /// Quantity on hand.
    pub stock: i64,

    /// Reorder threshold.
    pub min_stock: i64,

    /// Set at creation and on every mutation.
    pub last_updated: DateTime<Utc>,
}

impl Product {
    /// Low stock means `stock <= min_stock` (inclusive).
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Value of the stock on hand (`price × stock`).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.stock)
    }

    /// Status label shown in the product table.
    pub fn status(&self) -> StockStatus {
        if self.is_low_stock() {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }
}

/// Stock status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// At or below the reorder threshold.
    Low,
    /// Above the reorder threshold.
    Ok,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Low => write!(f, "Low Stock"),
            StockStatus::Ok => write!(f, "In Stock"),
        }
    }
}

// =============================================================================
// Product Inputs
// =============================================================================

/// Caller-supplied fields for a new product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: NumericInput,
    pub stock: NumericInput,
    pub min_stock: NumericInput,
}

impl NewProduct {
    /// Builds the input from anything convertible to the raw field types.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<NumericInput>,
        stock: impl Into<NumericInput>,
        min_stock: impl Into<NumericInput>,
    ) -> Self {
        NewProduct {
            name: name.into(),
            category: category.into(),
            price: price.into(),
            stock: stock.into(),
            min_stock: min_stock.into(),
        }
    }
}

/// Partial update for an existing product. `None` keeps the stored value.
///
/// There is no `id` field: identity never changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<NumericInput>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price(mut self, price: impl Into<NumericInput>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn stock(mut self, stock: impl Into<NumericInput>) -> Self {
        self.stock = Some(stock.into());
        self
    }

    pub fn min_stock(mut self, min_stock: impl Into<NumericInput>) -> Self {
        self.min_stock = Some(min_stock.into());
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.min_stock.is_none()
    }
}

// =============================================================================
// User
// =============================================================================

/// The logged-in session. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub is_authenticated: bool,
}

// =============================================================================
// Persisted Records
// =============================================================================

/// Shape of the `auth-storage` record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub user: Option<User>,
}

/// Shape of the `product-storage` record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedProducts {
    pub products: Vec<Product>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(stock: i64, min_stock: i64) -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            price: Money::from_minor(1000),
            stock,
            min_stock,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_low_stock_boundary_is_inclusive() {
        assert!(product(5, 10).is_low_stock());
        assert!(product(10, 10).is_low_stock());
        assert!(!product(11, 10).is_low_stock());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(product(0, 0).status(), StockStatus::Low);
        assert_eq!(product(3, 1).status(), StockStatus::Ok);
        assert_eq!(StockStatus::Low.to_string(), "Low Stock");
    }

    #[test]
    fn test_numeric_input_accepts_text_and_numbers() {
        let input: NewProduct = serde_json::from_str(
            r#"{"name":"A","category":"B","price":"19.99","stock":5,"minStock":2.5}"#,
        )
        .unwrap();
        assert_eq!(input.price, NumericInput::Text("19.99".to_string()));
        assert_eq!(input.stock, NumericInput::Integer(5));
        assert_eq!(input.min_stock, NumericInput::Float(2.5));
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let json = serde_json::to_value(product(1, 2)).unwrap();
        assert_eq!(json["minStock"], 2);
        assert_eq!(json["price"], 1000);
        assert!(json.get("lastUpdated").is_some());
    }

    #[test]
    fn test_patch_builder() {
        let patch = ProductPatch::new().stock(5i64);
        assert!(!patch.is_empty());
        assert_eq!(patch.stock, Some(NumericInput::Integer(5)));
        assert!(patch.name.is_none());
        assert!(ProductPatch::new().is_empty());
    }
}
