//! # Commands Module
//!
//! One function per CLI command. Each takes the [`AppState`] it needs and
//! returns a serializable response that can also render itself for humans.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Stockroom Commands                              │
//! │                                                                         │
//! │  AUTH (no gate)           INVENTORY (gated)        REPORTS (gated)     │
//! │  ──────────────           ─────────────────        ───────────────     │
//! │  login                    product list             report preview      │
//! │  logout                   product show             report export       │
//! │  whoami                   product add                                  │
//! │                           product update           DASHBOARD (gated)   │
//! │                           product delete           ─────────────────   │
//! │                                                    dashboard           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`AppState`]: crate::state::AppState

pub mod auth;
pub mod dashboard;
pub mod product;
pub mod report;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppResult;
use stockroom_core::{Money, Product, StockStatus};

/// A command result: JSON via serde, text via [`Output::human`].
pub trait Output: Serialize {
    fn human(&self) -> String;
}

/// Renders `value` the way the user asked for.
pub fn render<T: Output>(value: &T, json: bool) -> AppResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    } else {
        Ok(value.human())
    }
}

/// Product as shown to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Minor units: `1999` is 19.99.
    pub price_minor: Money,
    pub price_display: String,
    pub stock: i64,
    pub min_stock: i64,
    pub status: StockStatus,
    pub last_updated: DateTime<Utc>,
}

impl ProductDto {
    pub fn new(product: &Product, currency: &str) -> Self {
        ProductDto {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price_minor: product.price,
            price_display: product.price.with_symbol(currency),
            stock: product.stock,
            min_stock: product.min_stock,
            status: product.status(),
            last_updated: product.last_updated,
        }
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            short_id(&self.id).to_string(),
            self.name.clone(),
            self.category.clone(),
            self.price_display.clone(),
            self.stock.to_string(),
            self.min_stock.to_string(),
            self.status.to_string(),
        ]
    }
}

impl Output for ProductDto {
    fn human(&self) -> String {
        format!(
            "{}\n  id:           {}\n  category:     {}\n  price:        {}\n  stock:        {} (min {})\n  status:       {}\n  last updated: {}\n",
            self.name,
            self.id,
            self.category,
            self.price_display,
            self.stock,
            self.min_stock,
            self.status,
            self.last_updated.format("%Y-%m-%d %H:%M UTC"),
        )
    }
}

const PRODUCT_TABLE_HEADER: [&str; 7] = ["ID", "Name", "Category", "Price", "Stock", "Min", "Status"];

/// First segment of a UUID, enough to tell rows apart on screen.
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

fn product_table(products: &[ProductDto]) -> String {
    let rows: Vec<Vec<String>> = products.iter().map(ProductDto::table_row).collect();
    text_table(&PRODUCT_TABLE_HEADER, &rows)
}

/// Left-aligned columns separated by two spaces.
pub(crate) fn text_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let joined = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", joined.trim_end())
    };

    let mut out = line(header.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_text_table_aligns_columns() {
        let table = text_table(
            &["A", "Name"],
            &[
                vec!["1".to_string(), "Hammer".to_string()],
                vec!["22".to_string(), "Saw".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "A   Name");
        assert_eq!(lines[1], "--  ------");
        assert_eq!(lines[2], "1   Hammer");
        assert_eq!(lines[3], "22  Saw");
    }

    #[test]
    fn test_product_json_names_minor_unit_price() {
        let product = Product {
            id: "3f2a9c1e-1111-4222-8333-444455556666".to_string(),
            name: "Pen".to_string(),
            category: "Stationery".to_string(),
            price: Money::from_minor(1999),
            stock: 4,
            min_stock: 10,
            last_updated: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(ProductDto::new(&product, "₹")).unwrap();
        assert_eq!(json["priceMinor"], 1999);
        assert_eq!(json["priceDisplay"], "₹19.99");
        assert_eq!(json["status"], "low");
        assert!(json.get("price").is_none());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("3f2a9c1e-1111-4222-8333-444455556666"), "3f2a9c1e");
        assert_eq!(short_id("plain"), "plain");
    }
}
