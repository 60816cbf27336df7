//! # Product Repository
//!
//! The `{ products: [...] }` record under [`PRODUCT_NAMESPACE`].
//!
//! The whole collection is one record: every save rewrites it, which
//! keeps the stored list in the same order as the in-memory store.

use tracing::{debug, info};

use crate::error::DbResult;
use crate::repository::StorageRepository;
use stockroom_core::{PersistedProducts, PRODUCT_NAMESPACE};

#[derive(Debug, Clone)]
pub struct ProductRepository {
    storage: StorageRepository,
}

impl ProductRepository {
    pub fn new(storage: StorageRepository) -> Self {
        ProductRepository { storage }
    }

    /// The persisted collection, or an empty one when nothing is stored.
    pub async fn load(&self) -> DbResult<PersistedProducts> {
        let products = self
            .storage
            .load_json::<PersistedProducts>(PRODUCT_NAMESPACE)
            .await?
            .unwrap_or_default();

        debug!(count = products.products.len(), "Products loaded");
        Ok(products)
    }

    pub async fn save(&self, products: &PersistedProducts) -> DbResult<()> {
        self.storage.save_json(PRODUCT_NAMESPACE, products).await?;
        info!(count = products.products.len(), "Products saved");
        Ok(())
    }

    /// Number of stored products.
    pub async fn count(&self) -> DbResult<usize> {
        Ok(self.load().await?.products.len())
    }
}
