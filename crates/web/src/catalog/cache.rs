//! In-memory product cache, rebuilt wholesale from the document store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use haberdash_core::{Product, ProductFields, RecordId};
use thiserror::Error;
use tracing::instrument;

use crate::store::{Document, DocumentStore, StoreError};

use super::PRODUCTS_COLLECTION;

/// Errors that can occur while refreshing the cache.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The store read failed; the previous cache contents are retained.
    #[error("catalog fetch failed: {0}")]
    Store(#[from] StoreError),

    /// A fetched document could not be decoded into product fields.
    #[error("malformed product document {record_id}: {source}")]
    Malformed {
        record_id: RecordId,
        source: serde_json::Error,
    },
}

#[derive(Default)]
struct CacheState {
    products: Vec<Product>,
    /// Generation of the fetch whose result is currently applied.
    applied: u64,
}

/// The in-memory product list for the running process.
///
/// `refresh()` replaces the whole list from the store; there are no
/// incremental updates. Fetches are generation-stamped: each call takes the
/// next generation before hitting the network, and a response only applies
/// if no newer response landed first, so an old in-flight fetch can never
/// clobber a newer one. All list replacement happens under an exclusive
/// write lock; readers clone the current snapshot.
pub struct CatalogCache<S> {
    store: Arc<S>,
    issued: AtomicU64,
    state: RwLock<CacheState>,
}

impl<S: DocumentStore> CatalogCache<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            issued: AtomicU64::new(0),
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Fetch the full product collection, replacing the in-memory list.
    ///
    /// Returns the list now in the cache. If this response was superseded by
    /// a newer one while in flight, it is discarded and the newer list is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the store read fails or a document is
    /// malformed; the previously cached list is retained either way.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<Product>, FetchError> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let documents = self.store.list_all(PRODUCTS_COLLECTION).await?;
        let products = documents
            .into_iter()
            .map(rehydrate)
            .collect::<Result<Vec<_>, _>>()?;

        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        if generation > state.applied {
            tracing::debug!(generation, count = products.len(), "catalog cache replaced");
            state.applied = generation;
            state.products = products;
        } else {
            tracing::debug!(
                generation,
                applied = state.applied,
                "discarding stale catalog fetch"
            );
        }

        Ok(state.products.clone())
    }

    /// The last successfully fetched list (empty before the first fetch).
    #[must_use]
    pub fn current_list(&self) -> Vec<Product> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .products
            .clone()
    }

    /// Look up a single product in the current snapshot.
    #[must_use]
    pub fn find(&self, record_id: &RecordId) -> Option<Product> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .products
            .iter()
            .find(|p| p.record_id == *record_id)
            .cloned()
    }
}

/// Rehydrate a stored document into a product.
///
/// A document without a `display_id` is a data-quality condition worth
/// surfacing, not silently papering over - it means the record predates the
/// code scheme or was written by another tool.
fn rehydrate(document: Document) -> Result<Product, FetchError> {
    let fields: ProductFields =
        serde_json::from_value(document.fields).map_err(|source| FetchError::Malformed {
            record_id: document.record_id.clone(),
            source,
        })?;

    if fields.display_id.is_none() {
        tracing::warn!(record_id = %document.record_id, "product document has no display_id");
    }

    Ok(Product::from_parts(document.record_id, fields))
}
