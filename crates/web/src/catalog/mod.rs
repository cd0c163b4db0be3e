//! Catalog state: synchronization, mutation, and the category registry.
//!
//! Data flow is one-directional. Reads: document store -> [`CatalogCache`]
//! -> filter engine -> templates. Writes: [`CatalogMutator`] -> document
//! store, after which the caller refreshes the cache. The mutator never
//! patches the cache itself - the store stays the single source of truth
//! and the cache is always a whole fetched snapshot, never a locally
//! edited one. The cost is one extra round-trip per mutation and a
//! staleness window between a remote write and the next refresh; for a
//! one-operator catalog that trade is fine.

pub mod cache;
pub mod mutator;
pub mod registry;

pub use cache::{CatalogCache, FetchError};
pub use mutator::{CatalogMutator, MutateError, NewProduct, ValidationError};
pub use registry::CategoryRegistry;

/// The document store collection holding products.
pub const PRODUCTS_COLLECTION: &str = "products";
