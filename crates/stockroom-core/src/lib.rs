//! # stockroom-core: Pure Inventory Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It holds the two state
//! containers (auth and products) and every derived view, as pure code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stockroom CLI (apps/cli)                     │   │
//! │  │    login ──► dashboard ──► product list/add ──► report export  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   store   │  │   views   │  │ document  │  │   │
//! │  │   │  Product  │  │ AuthStore │  │ Dashboard │  │ Document  │  │   │
//! │  │   │   User    │  │ProductStr │  │ Table     │  │ Pages     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockroom-db (Persistence Layer)                 │   │
//! │  │          namespaced records: auth-storage, product-storage      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, inputs and patches)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`validation`] - Field validation and numeric coercion
//! - [`store`] - The auth and product state containers
//! - [`views`] - Dashboard, product table and report derivations
//! - [`document`] - Paginated report document
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::store::ProductStore;
//! use stockroom_core::types::NewProduct;
//! use stockroom_core::views::dashboard_summary;
//!
//! let mut store = ProductStore::new();
//! store
//!     .add(NewProduct::new("Notebook", "Stationery", "19.99", "4", "10"))
//!     .unwrap();
//!
//! let summary = dashboard_summary(store.products());
//! assert_eq!(summary.stats.total_products, 1);
//! assert_eq!(summary.stats.low_stock, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;
pub mod views;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage namespace holding the `{ user }` record.
pub const AUTH_NAMESPACE: &str = "auth-storage";

/// Storage namespace holding the `{ products }` record.
pub const PRODUCT_NAMESPACE: &str = "product-storage";

/// Schema version written next to every persisted record.
///
/// Bump when the shape of [`PersistedAuth`] or [`PersistedProducts`]
/// changes in a way older readers cannot handle.
pub const STORAGE_SCHEMA_VERSION: i64 = 1;

/// How many entries the dashboard shows in "Recent Activity".
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// How many entries the dashboard shows in "Low Stock Alerts".
pub const LOW_STOCK_PREVIEW_LIMIT: usize = 5;
