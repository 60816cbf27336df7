//! # Product Store
//!
//! The ordered product collection and its four mutations.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(NewProduct)          → validate, new UUID, stamp, push            │
//! │  update(id, ProductPatch) → absent id: no-op                           │
//! │                             else validate, merge, re-stamp              │
//! │  delete(id)               → absent id: no-op                           │
//! │  bulk_delete(ids)         → same as repeated delete                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation has an `*_at` twin that takes the timestamp explicitly;
//! the plain versions use `Utc::now()`.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::types::{NewProduct, PersistedProducts, Product, ProductPatch};
use crate::validation::{normalize_new, normalize_patch};

/// Owned, in-memory product collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a persisted collection.
    ///
    /// Later records that reuse an earlier id are dropped so the
    /// uniqueness invariant holds even for hand-edited storage.
    pub fn restore(persisted: PersistedProducts) -> Self {
        let mut seen = HashSet::new();
        let products = persisted
            .products
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();
        ProductStore { products }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The record to persist under the product namespace.
    pub fn snapshot(&self) -> PersistedProducts {
        PersistedProducts {
            products: self.products.clone(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product and returns the stored record.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::store::ProductStore;
    /// use stockroom_core::types::NewProduct;
    ///
    /// let mut store = ProductStore::new();
    /// let created = store.add(NewProduct::new("Pen", "Stationery", "19.99", "5", "2")).unwrap();
    /// assert_eq!(store.get(&created.id).unwrap().price.minor(), 1999);
    /// ```
    pub fn add(&mut self, input: NewProduct) -> CoreResult<Product> {
        self.add_at(input, Utc::now())
    }

    /// [`add`](Self::add) with an explicit timestamp.
    pub fn add_at(&mut self, input: NewProduct, now: DateTime<Utc>) -> CoreResult<Product> {
        let fields = normalize_new(&input)?;

        let product = Product {
            id: self.fresh_id(),
            name: fields.name,
            category: fields.category,
            price: fields.price,
            stock: fields.stock,
            min_stock: fields.min_stock,
            last_updated: now,
        };

        self.products.push(product.clone());
        Ok(product)
    }

    /// Merges `patch` into the product with `id`.
    ///
    /// Returns `Ok(None)` and changes nothing when the id is unknown.
    pub fn update(&mut self, id: &str, patch: ProductPatch) -> CoreResult<Option<Product>> {
        self.update_at(id, patch, Utc::now())
    }

    /// [`update`](Self::update) with an explicit timestamp.
    pub fn update_at(
        &mut self,
        id: &str,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> CoreResult<Option<Product>> {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        let patch = normalize_patch(&patch)?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = patch.min_stock {
            product.min_stock = min_stock;
        }
        product.last_updated = now;

        Ok(Some(product.clone()))
    }

    /// Removes the product with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    /// Removes every product whose id is in `ids`. Returns how many went.
    pub fn bulk_delete<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let ids: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        let before = self.products.len();
        self.products.retain(|p| !ids.contains(p.id.as_str()));
        before - self.products.len()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::money::Money;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn seeded() -> (ProductStore, Vec<String>) {
        let mut store = ProductStore::new();
        let ids = [("A", 10i64, 5i64, 10i64), ("B", 20, 20, 5), ("C", 3, 1, 1)]
            .into_iter()
            .map(|(name, price, stock, min)| {
                store
                    .add_at(NewProduct::new(name, "General", price, stock, min), t0())
                    .unwrap()
                    .id
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_add_coerces_text_fields() {
        let mut store = ProductStore::new();
        let created = store
            .add_at(NewProduct::new("Pen", "Stationery", "19.99", "5", "2"), t0())
            .unwrap();

        let stored = store.get(&created.id).unwrap();
        assert_eq!(stored.price, Money::from_minor(1999));
        assert_eq!(stored.stock, 5);
        assert_eq!(stored.min_stock, 2);
        assert_eq!(stored.last_updated, t0());
        assert!(Uuid::parse_str(&stored.id).is_ok());
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let (store, ids) = seeded();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let mut store = ProductStore::new();
        let err = store
            .add(NewProduct::new("Pen", "Stationery", "1", "-4", "0"))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_changes_only_given_field_and_timestamp() {
        let (mut store, ids) = seeded();
        let before = store.get(&ids[0]).unwrap().clone();
        let later = t0() + Duration::hours(1);

        let updated = store
            .update_at(&ids[0], ProductPatch::new().stock(5i64), later)
            .unwrap()
            .unwrap();

        assert_eq!(updated.stock, 5);
        assert_eq!(updated.last_updated, later);
        assert_eq!(updated.id, before.id);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.category, before.category);
        assert_eq!(updated.price, before.price);
        assert_eq!(updated.min_stock, before.min_stock);
    }

    #[test]
    fn test_update_allows_zero_values() {
        let (mut store, ids) = seeded();
        let updated = store
            .update(&ids[1], ProductPatch::new().price("0").stock("0"))
            .unwrap()
            .unwrap();
        assert!(updated.price.is_zero());
        assert_eq!(updated.stock, 0);
    }

    #[test]
    fn test_update_absent_id_is_noop() {
        let (mut store, _) = seeded();
        let before = store.clone();

        let result = store
            .update("missing", ProductPatch::new().name("Ghost"))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_update_with_invalid_patch_changes_nothing() {
        let (mut store, ids) = seeded();
        let before = store.clone();
        assert!(store
            .update(&ids[0], ProductPatch::new().stock(7i64).price("oops"))
            .is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete() {
        let (mut store, ids) = seeded();
        assert!(store.delete(&ids[1]));
        assert_eq!(store.len(), 2);
        assert!(!store.delete(&ids[1]));
        assert!(!store.delete("missing"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_bulk_delete_ignores_order_and_unknown_ids() {
        let (mut store, ids) = seeded();
        let removed = store.bulk_delete(&[ids[2].as_str(), "missing", ids[0].as_str()]);
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.products()[0].id, ids[1]);
    }

    #[test]
    fn test_restore_drops_duplicate_ids() {
        let (store, _) = seeded();
        let mut snapshot = store.snapshot();
        snapshot.products.push(snapshot.products[0].clone());

        let restored = ProductStore::restore(snapshot);
        assert_eq!(restored, store);
    }
}
