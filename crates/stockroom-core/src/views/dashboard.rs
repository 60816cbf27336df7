//! # Dashboard
//!
//! Headline numbers plus two short lists.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Total        │ Low Stock    │ Total Value  │ Categories   │
//! │ count        │ stock<=min   │ Σ price×qty  │ distinct     │
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//! Recent Activity   top 5 by lastUpdated, newest first
//! Low Stock Alerts  first 5 low-stock items in collection order
//! ```

use serde::Serialize;
use std::collections::HashSet;

use crate::money::Money;
use crate::types::Product;
use crate::{LOW_STOCK_PREVIEW_LIMIT, RECENT_ACTIVITY_LIMIT};

/// Aggregates shown in the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock: usize,
    pub total_value: Money,
    pub categories: usize,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_activity: Vec<Product>,
    pub low_stock_items: Vec<Product>,
}

pub fn dashboard_stats(products: &[Product]) -> DashboardStats {
    let categories: HashSet<&str> = products.iter().map(|p| p.category.as_str()).collect();

    DashboardStats {
        total_products: products.len(),
        low_stock: products.iter().filter(|p| p.is_low_stock()).count(),
        total_value: products.iter().map(Product::stock_value).sum(),
        categories: categories.len(),
    }
}

/// The `limit` most recently updated products, newest first.
///
/// Equal timestamps keep collection order. The input is not reordered.
pub fn recent_activity(products: &[Product], limit: usize) -> Vec<&Product> {
    let mut recent: Vec<&Product> = products.iter().collect();
    recent.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    recent.truncate(limit);
    recent
}

/// The first `limit` low-stock products in collection order.
pub fn low_stock_items(products: &[Product], limit: usize) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.is_low_stock())
        .take(limit)
        .collect()
}

/// Stats plus both preview lists at their standard lengths.
pub fn dashboard_summary(products: &[Product]) -> DashboardSummary {
    DashboardSummary {
        stats: dashboard_stats(products),
        recent_activity: recent_activity(products, RECENT_ACTIVITY_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        low_stock_items: low_stock_items(products, LOW_STOCK_PREVIEW_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    }
}
