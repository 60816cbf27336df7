//! # Report View
//!
//! Filters the collection for a report and turns it into printable rows.
//!
//! ## Pipeline
//! ```text
//! products
//!    │  category == selected (or "all")
//!    │  lastUpdated >= now - N days
//!    ▼
//! in-range set ──────────────► ReportSummary (total, lowStock, totalValue)
//!    │  report type low-stock: keep stock <= minStock
//!    ▼
//! ReportRow { S.No, Name, Category, Stock, Min Stock, Price, Last Updated }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

/// Date format used in report rows.
pub const REPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Category choice value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Parameters
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    /// Every in-range product.
    #[default]
    Stock,
    /// Only in-range products at or below their threshold.
    LowStock,
}

impl ReportType {
    pub fn title(self) -> &'static str {
        match self {
            ReportType::Stock => "Stock Levels Report",
            ReportType::LowStock => "Low Stock Report",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Stock => f.write_str("stock"),
            ReportType::LowStock => f.write_str("low-stock"),
        }
    }
}

impl FromStr for ReportType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stock" => Ok(ReportType::Stock),
            "low-stock" | "lowStock" | "low_stock" => Ok(ReportType::LowStock),
            other => Err(CoreError::invalid_parameter("type", other)),
        }
    }
}

/// The four supported look-back windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DateRange {
    #[default]
    Last7Days,
    Last30Days,
    Last90Days,
    LastYear,
}

impl DateRange {
    pub fn days(self) -> u32 {
        match self {
            DateRange::Last7Days => 7,
            DateRange::Last30Days => 30,
            DateRange::Last90Days => 90,
            DateRange::LastYear => 365,
        }
    }

    /// Earliest `lastUpdated` still inside the window.
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.days()))
    }
}

impl TryFrom<u32> for DateRange {
    type Error = CoreError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(DateRange::Last7Days),
            30 => Ok(DateRange::Last30Days),
            90 => Ok(DateRange::Last90Days),
            365 => Ok(DateRange::LastYear),
            other => Err(CoreError::invalid_parameter("days", other.to_string())),
        }
    }
}

impl From<DateRange> for u32 {
    fn from(range: DateRange) -> Self {
        range.days()
    }
}

/// `All` or one exact category label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// `"all"` (or blank) selects every category; anything else is exact.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(category) => product.category == *category,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(category) => category,
        }
    }
}

/// Everything that selects a report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportFilter {
    pub category: CategoryFilter,
    pub range: DateRange,
    pub report_type: ReportType,
}

impl ReportFilter {
    /// Builds a filter from raw command arguments.
    pub fn from_params(category: &str, days: u32, report_type: &str) -> CoreResult<Self> {
        Ok(ReportFilter {
            category: CategoryFilter::parse(category),
            range: DateRange::try_from(days)?,
            report_type: report_type.parse()?,
        })
    }

    pub fn title(&self) -> &'static str {
        self.report_type.title()
    }

    pub fn subtitle(&self) -> String {
        format!(
            "Category: {} | Date Range: Last {} days",
            self.category.label(),
            self.range.days()
        )
    }

    /// Category and date window only; the report type is applied later.
    pub fn in_range(&self, product: &Product, now: DateTime<Utc>) -> bool {
        self.category.matches(product) && product.last_updated >= self.range.cutoff(now)
    }
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total: usize,
    pub low_stock: usize,
    pub total_value: Money,
}

/// One printable report line. `price` and `last_updated` are pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub index: usize,
    pub name: String,
    pub category: String,
    pub stock: i64,
    pub min_stock: i64,
    pub price: String,
    pub last_updated: String,
}

impl ReportRow {
    fn new(index: usize, product: &Product, currency: &str) -> Self {
        ReportRow {
            index,
            name: product.name.clone(),
            category: product.category.clone(),
            stock: product.stock,
            min_stock: product.min_stock,
            price: product.price.with_symbol(currency),
            last_updated: product.last_updated.format(REPORT_DATE_FORMAT).to_string(),
        }
    }

    /// Cells in header order.
    pub fn cells(&self) -> [String; 7] {
        [
            self.index.to_string(),
            self.name.clone(),
            self.category.clone(),
            self.stock.to_string(),
            self.min_stock.to_string(),
            self.price.clone(),
            self.last_updated.clone(),
        ]
    }
}

/// A fully computed report, ready for preview or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub title: String,
    pub subtitle: String,
    pub summary: ReportSummary,
    pub rows: Vec<ReportRow>,
}

/// `"all"` followed by each distinct category in first-seen order.
pub fn report_categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !categories[1..].contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

/// Computes the report for `filter` as of `now`.
///
/// Row indexes start at 1. `currency` prefixes every price.
pub fn build_report(
    products: &[Product],
    filter: &ReportFilter,
    now: DateTime<Utc>,
    currency: &str,
) -> ReportView {
    let in_range: Vec<&Product> = products.iter().filter(|p| filter.in_range(p, now)).collect();

    let summary = ReportSummary {
        total: in_range.len(),
        low_stock: in_range.iter().filter(|p| p.is_low_stock()).count(),
        total_value: in_range.iter().map(|p| p.stock_value()).sum(),
    };

    let rows = in_range
        .into_iter()
        .filter(|p| filter.report_type == ReportType::Stock || p.is_low_stock())
        .enumerate()
        .map(|(i, p)| ReportRow::new(i + 1, p, currency))
        .collect();

    ReportView {
        title: filter.title().to_string(),
        subtitle: filter.subtitle(),
        summary,
        rows,
    }
}
