//! # Product Table
//!
//! Search then sort. The sort is stable in both directions: descending
//! flips the comparator rather than reversing the output, so products
//! with equal keys always keep their collection order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Product;

/// Column the table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Category,
    Price,
    Stock,
}

impl SortKey {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Stock => a.stock.cmp(&b.stock),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Price => "price",
            SortKey::Stock => "stock",
        };
        f.write_str(s)
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "category" => Ok(SortKey::Category),
            "price" => Ok(SortKey::Price),
            "stock" => Ok(SortKey::Stock),
            _ => Err(CoreError::invalid_parameter("sort", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Current sort column and direction. Defaults to name ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        SortConfig { key, direction }
    }

    /// Column-header click: the same key while ascending flips to
    /// descending, anything else starts ascending on `key`.
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortConfig { key, direction }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ord = self.key.compare(a, b);
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Search term plus sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    pub sort: SortConfig,
}

impl TableQuery {
    pub fn new(search: impl Into<String>, sort: SortConfig) -> Self {
        TableQuery {
            search: search.into(),
            sort,
        }
    }
}

/// Case-insensitive substring match on name or category.
///
/// An empty term matches every product.
pub fn matches_search(product: &Product, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    product.name.to_lowercase().contains(&term) || product.category.to_lowercase().contains(&term)
}

/// Filters and sorts `products` for display.
///
/// ## Example
/// ```rust
/// use stockroom_core::store::ProductStore;
/// use stockroom_core::types::NewProduct;
/// use stockroom_core::views::{product_table, SortConfig, SortDirection, SortKey, TableQuery};
///
/// let mut store = ProductStore::new();
/// store.add(NewProduct::new("Hammer", "Tools", "12", "3", "1")).unwrap();
/// store.add(NewProduct::new("Brush", "Paint", "4", "9", "2")).unwrap();
/// store.add(NewProduct::new("Roller", "Paint", "7", "1", "2")).unwrap();
///
/// let query = TableQuery::new("PAINT", SortConfig::new(SortKey::Stock, SortDirection::Desc));
/// let names: Vec<_> = product_table(store.products(), &query).iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, ["Brush", "Roller"]);
/// ```
pub fn product_table<'a>(products: &'a [Product], query: &TableQuery) -> Vec<&'a Product> {
    let term = query.search.trim();
    let mut rows: Vec<&Product> = products.iter().filter(|p| matches_search(p, term)).collect();
    rows.sort_by(|a, b| query.sort.compare(a, b));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::{TimeZone, Utc};

    fn product(id: &str, name: &str, category: &str, price: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price: Money::from_minor(price),
            stock,
            min_stock: 0,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("1", "Widget", "Hardware", 500, 10),
            product("2", "Bolt", "Hardware", 20, 3),
            product("3", "Glue", "Adhesives", 300, 25),
            product("4", "Tape", "Adhesives", 150, 7),
        ]
    }

    fn ids(rows: &[&Product]) -> Vec<String> {
        rows.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let products = sample();
        let rows = product_table(&products, &TableQuery::default());
        assert_eq!(ids(&rows), vec!["2", "3", "4", "1"]);
    }

    #[test]
    fn test_search_matches_name_or_category_case_insensitively() {
        let products = sample();
        let by_category = product_table(&products, &TableQuery::new("hard", SortConfig::default()));
        assert_eq!(ids(&by_category), vec!["2", "1"]);

        let by_name = product_table(&products, &TableQuery::new("GLU", SortConfig::default()));
        assert_eq!(ids(&by_name), vec!["3"]);

        let none = product_table(&products, &TableQuery::new("zzz", SortConfig::default()));
        assert!(none.is_empty());
    }

    #[test]
    fn test_stock_toggle_yields_exact_reverse() {
        let products = sample();
        let asc = SortConfig::default().toggle(SortKey::Stock);
        assert_eq!(asc, SortConfig::new(SortKey::Stock, SortDirection::Asc));
        let desc = asc.toggle(SortKey::Stock);
        assert_eq!(desc.direction, SortDirection::Desc);

        let mut up = ids(&product_table(&products, &TableQuery::new("", asc)));
        let down = ids(&product_table(&products, &TableQuery::new("", desc)));
        assert_eq!(up, vec!["2", "4", "1", "3"]);
        up.reverse();
        assert_eq!(up, down);
    }

    #[test]
    fn test_ties_keep_collection_order_in_both_directions() {
        let products = vec![
            product("a", "Anvil", "X", 100, 5),
            product("b", "Bench", "Y", 100, 1),
            product("c", "Clamp", "Z", 100, 5),
            product("d", "Drill", "W", 100, 5),
        ];

        let sorted = |key, direction| {
            ids(&product_table(
                &products,
                &TableQuery::new("", SortConfig::new(key, direction)),
            ))
        };

        assert_eq!(sorted(SortKey::Stock, SortDirection::Asc), vec!["b", "a", "c", "d"]);
        assert_eq!(sorted(SortKey::Stock, SortDirection::Desc), vec!["a", "c", "d", "b"]);
        assert_eq!(sorted(SortKey::Price, SortDirection::Desc), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_toggle_other_key_resets_to_ascending() {
        let desc = SortConfig::new(SortKey::Price, SortDirection::Desc);
        assert_eq!(
            desc.toggle(SortKey::Price),
            SortConfig::new(SortKey::Price, SortDirection::Asc)
        );
        assert_eq!(
            desc.toggle(SortKey::Category),
            SortConfig::new(SortKey::Category, SortDirection::Asc)
        );
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("Price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert!("colour".parse::<SortKey>().is_err());
    }
}
