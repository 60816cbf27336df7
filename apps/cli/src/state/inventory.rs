//! # Inventory State
//!
//! The product store paired with the repository that persists it.
//!
//! ```text
//! command ──► with_store_mut(|store| mutate; snapshot) ──► repo.save(snapshot)
//!                       (lock held)                          (lock released)
//! ```
//!
//! Absent ids are silent no-ops: nothing changes and nothing is written.

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use crate::error::AppResult;
use stockroom_core::store::ProductStore;
use stockroom_core::{NewProduct, Product, ProductPatch};
use stockroom_db::ProductRepository;

pub struct InventoryState {
    store: Mutex<ProductStore>,
    repo: ProductRepository,
}

impl InventoryState {
    pub async fn load(repo: ProductRepository) -> AppResult<Self> {
        let persisted = repo.load().await?;
        let store = ProductStore::restore(persisted);
        debug!(count = store.len(), "Inventory restored");

        Ok(InventoryState {
            store: Mutex::new(store),
            repo,
        })
    }

    fn lock(&self) -> MutexGuard<'_, ProductStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ProductStore) -> R,
    {
        f(&self.lock())
    }

    fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ProductStore) -> R,
    {
        f(&mut self.lock())
    }

    pub async fn add(&self, input: NewProduct) -> AppResult<Product> {
        self.add_at(input, Utc::now()).await
    }

    pub async fn add_at(&self, input: NewProduct, now: DateTime<Utc>) -> AppResult<Product> {
        let (product, snapshot) = self.with_store_mut(|store| {
            let product = store.add_at(input, now)?;
            Ok::<_, stockroom_core::CoreError>((product, store.snapshot()))
        })?;

        self.repo.save(&snapshot).await?;
        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// `Ok(None)` when no product has `id`.
    pub async fn update(&self, id: &str, patch: ProductPatch) -> AppResult<Option<Product>> {
        let result = self.with_store_mut(|store| {
            let updated = store.update(id, patch)?;
            Ok::<_, stockroom_core::CoreError>(updated.map(|p| (p, store.snapshot())))
        })?;

        let Some((product, snapshot)) = result else {
            debug!(id, "Update ignored: no such product");
            return Ok(None);
        };

        self.repo.save(&snapshot).await?;
        info!(id, "Product updated");
        Ok(Some(product))
    }

    /// Returns how many products were removed.
    pub async fn delete_many<S: AsRef<str>>(&self, ids: &[S]) -> AppResult<usize> {
        let (removed, snapshot) = self.with_store_mut(|store| {
            let removed = store.bulk_delete(ids);
            (removed, store.snapshot())
        });

        if removed > 0 {
            self.repo.save(&snapshot).await?;
        }
        info!(requested = ids.len(), removed, "Products deleted");
        Ok(removed)
    }

    /// Single-id delete. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let snapshot = self.with_store_mut(|store| store.delete(id).then(|| store.snapshot()));

        match snapshot {
            Some(snapshot) => {
                self.repo.save(&snapshot).await?;
                info!(id, "Product deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl std::fmt::Debug for InventoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryState")
            .field("products", &self.lock().len())
            .finish_non_exhaustive()
    }
}
