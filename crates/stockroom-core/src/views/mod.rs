//! # Derived Views
//!
//! Read-only computations over the product collection. Nothing here is
//! stored or cached; every call recomputes from the slice it is given.
//!
//! ```text
//! &[Product] ──┬──► dashboard::dashboard_summary()  → stats, recent, low stock
//!              ├──► table::product_table()          → filtered + stable-sorted
//!              └──► report::build_report()          → title, summary, rows
//! ```

pub mod dashboard;
pub mod report;
pub mod table;

pub use dashboard::{dashboard_stats, dashboard_summary, DashboardStats, DashboardSummary};
pub use report::{
    build_report, report_categories, CategoryFilter, DateRange, ReportFilter, ReportRow,
    ReportSummary, ReportType, ReportView,
};
pub use table::{product_table, SortConfig, SortDirection, SortKey, TableQuery};
