//! # Dashboard Command
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Products  12 │ Low Stock  3 │ Value ₹9,990 │ Categories 4 │
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//! Recent Activity      (5 newest)
//! Low Stock Alerts     (first 5)
//! ```

use serde::Serialize;

use super::{product_table, Output, ProductDto};
use crate::error::AppResult;
use crate::state::AppState;
use stockroom_core::views::{dashboard_summary, DashboardStats};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub total_value_display: String,
    pub recent_activity: Vec<ProductDto>,
    pub low_stock_items: Vec<ProductDto>,
}

impl Output for DashboardResponse {
    fn human(&self) -> String {
        let mut out = format!(
            "Total products:  {}\nLow stock:       {}\nTotal value:     {}\nCategories:      {}\n",
            self.stats.total_products,
            self.stats.low_stock,
            self.total_value_display,
            self.stats.categories,
        );

        out.push_str("\nRecent Activity\n");
        if self.recent_activity.is_empty() {
            out.push_str("  (none)\n");
        } else {
            out.push_str(&product_table(&self.recent_activity));
        }

        out.push_str("\nLow Stock Alerts\n");
        if self.low_stock_items.is_empty() {
            out.push_str("  All products are above their minimum stock.\n");
        } else {
            out.push_str(&product_table(&self.low_stock_items));
        }

        out
    }
}

pub fn dashboard(state: &AppState) -> AppResult<DashboardResponse> {
    state.require_auth()?;

    let currency = &state.config.currency_symbol;
    let summary = state.inventory.with_store(|store| dashboard_summary(store.products()));
    let dto = |items: Vec<stockroom_core::Product>| -> Vec<ProductDto> {
        items.iter().map(|p| ProductDto::new(p, currency)).collect()
    };

    Ok(DashboardResponse {
        stats: summary.stats,
        total_value_display: summary.stats.total_value.with_symbol(currency),
        recent_activity: dto(summary.recent_activity),
        low_stock_items: dto(summary.low_stock_items),
    })
}
