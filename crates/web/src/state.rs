//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::{CatalogCache, CatalogMutator, CategoryRegistry};
use crate::config::WebConfig;
use crate::db::PgSettings;
use crate::store::HttpDocumentStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources. Everything the original ambient-storage design kept in
/// globals lives here instead and is injected through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    pool: PgPool,
    cache: CatalogCache<HttpDocumentStore>,
    mutator: CatalogMutator<HttpDocumentStore>,
    registry: CategoryRegistry<PgSettings>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog cache and mutator share one document store client; the
    /// category registry persists through the local database.
    #[must_use]
    pub fn new(config: WebConfig, pool: PgPool) -> Self {
        let store = Arc::new(HttpDocumentStore::new(&config.store));
        let cache = CatalogCache::new(Arc::clone(&store));
        let mutator = CatalogMutator::new(store);
        let registry = CategoryRegistry::new(PgSettings::new(pool.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                cache,
                mutator,
                registry,
            }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the product cache.
    #[must_use]
    pub fn cache(&self) -> &CatalogCache<HttpDocumentStore> {
        &self.inner.cache
    }

    /// Get a reference to the catalog mutator.
    #[must_use]
    pub fn mutator(&self) -> &CatalogMutator<HttpDocumentStore> {
        &self.inner.mutator
    }

    /// Get a reference to the category registry.
    #[must_use]
    pub fn registry(&self) -> &CategoryRegistry<PgSettings> {
        &self.inner.registry
    }
}
