//! # Product Commands
//!
//! Listing, lookup and the four mutations.
//!
//! ## List Flow
//! ```text
//! product list --search pen --sort stock --desc
//!      │
//!      ▼
//! validate_search_query("pen")
//!      │
//!      ▼
//! product_table(products, { search, sort: stock desc })
//!      │  case-insensitive match on name OR category
//!      │  stable sort, ties keep collection order
//!      ▼
//! Vec<ProductDto> → table or JSON
//! ```

use serde::Serialize;
use tracing::debug;

use super::{product_table as render_products, Output, ProductDto};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use stockroom_core::validation::validate_search_query;
use stockroom_core::views::{product_table, SortConfig, SortDirection, SortKey, TableQuery};
use stockroom_core::{NewProduct, ProductPatch};

/// Arguments of `product list`.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub search: String,
    pub sort: SortKey,
    pub descending: bool,
}

impl ListParams {
    fn query(&self) -> AppResult<TableQuery> {
        let direction = if self.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        let search = validate_search_query(&self.search)
            .map_err(|e| AppError::validation(e.to_string()))?;
        Ok(TableQuery::new(search, SortConfig::new(self.sort, direction)))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub search: String,
    pub sort: SortConfig,
    pub total: usize,
    pub products: Vec<ProductDto>,
}

impl Output for ProductListResponse {
    fn human(&self) -> String {
        if self.products.is_empty() {
            return if self.search.is_empty() {
                "No products yet. Add one with `stockroom product add`.\n".to_string()
            } else {
                format!("No products match '{}'.\n", self.search)
            };
        }

        let mut out = render_products(&self.products);
        out.push_str(&format!("\n{} of {} products\n", self.products.len(), self.total));
        out
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub id: String,
    pub product: Option<ProductDto>,
}

impl Output for UpdateResponse {
    fn human(&self) -> String {
        match &self.product {
            Some(product) => format!("Updated {}\n{}", product.name, product.human()),
            None => format!("No product with id {}; nothing changed.\n", self.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub requested: usize,
    pub removed: usize,
}

impl Output for DeleteResponse {
    fn human(&self) -> String {
        format!("Deleted {} of {} requested products\n", self.removed, self.requested)
    }
}

pub fn list(state: &AppState, params: &ListParams) -> AppResult<ProductListResponse> {
    state.require_auth()?;
    let query = params.query()?;
    debug!(search = %query.search, sort = %query.sort.key, "product list command");

    let currency = &state.config.currency_symbol;
    let (total, products) = state.inventory.with_store(|store| {
        let rows: Vec<ProductDto> = product_table(store.products(), &query)
            .into_iter()
            .map(|p| ProductDto::new(p, currency))
            .collect();
        (store.len(), rows)
    });

    Ok(ProductListResponse {
        search: query.search,
        sort: query.sort,
        total,
        products,
    })
}

pub fn show(state: &AppState, id: &str) -> AppResult<ProductDto> {
    state.require_auth()?;

    state
        .inventory
        .with_store(|store| store.get(id).map(|p| ProductDto::new(p, &state.config.currency_symbol)))
        .ok_or_else(|| AppError::not_found("Product", id))
}

pub async fn add(state: &AppState, input: NewProduct) -> AppResult<ProductDto> {
    state.require_auth()?;
    let product = state.inventory.add(input).await?;
    Ok(ProductDto::new(&product, &state.config.currency_symbol))
}

/// Unknown ids are reported in the response, not as an error.
pub async fn update(state: &AppState, id: &str, patch: ProductPatch) -> AppResult<UpdateResponse> {
    state.require_auth()?;

    if patch.is_empty() {
        return Err(AppError::validation("Nothing to update: pass at least one field"));
    }

    let updated = state.inventory.update(id, patch).await?;
    Ok(UpdateResponse {
        id: id.to_string(),
        product: updated.map(|p| ProductDto::new(&p, &state.config.currency_symbol)),
    })
}

pub async fn delete(state: &AppState, ids: &[String]) -> AppResult<DeleteResponse> {
    state.require_auth()?;

    let removed = match ids {
        [id] => usize::from(state.inventory.delete(id).await?),
        _ => state.inventory.delete_many(ids).await?,
    };

    Ok(DeleteResponse {
        requested: ids.len(),
        removed,
    })
}

/// Bulk-deletes every product the list view shows for `term`.
///
/// An empty term would select the whole inventory and is refused.
pub async fn delete_matching(state: &AppState, term: &str) -> AppResult<DeleteResponse> {
    state.require_auth()?;

    let search = validate_search_query(term).map_err(|e| AppError::validation(e.to_string()))?;
    if search.is_empty() {
        return Err(AppError::validation("--matching needs a non-empty search term"));
    }

    let query = TableQuery::new(search, SortConfig::default());
    let ids: Vec<String> = state.inventory.with_store(|store| {
        product_table(store.products(), &query)
            .into_iter()
            .map(|p| p.id.clone())
            .collect()
    });

    let removed = state.inventory.delete_many(&ids).await?;
    Ok(DeleteResponse {
        requested: ids.len(),
        removed,
    })
}
