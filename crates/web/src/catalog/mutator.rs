//! Product create/update/delete against the document store.

use std::sync::Arc;

use haberdash_core::{DisplayId, ProductFields, RecordId};
use rand::Rng;
use thiserror::Error;
use tracing::instrument;

use crate::store::{DocumentStore, StoreError};

use super::PRODUCTS_COLLECTION;

const DISPLAY_ID_LENGTH: usize = 6;
const DISPLAY_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// A product missing a required field, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("product name is required")]
    MissingName,
    #[error("product category is required")]
    MissingCategory,
}

/// Errors that can occur while mutating the catalog.
#[derive(Debug, Error)]
pub enum MutateError {
    /// Rejected locally; the store was never contacted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The target record no longer exists. Hard failure for update; for
    /// delete, callers treat it as already-satisfied.
    #[error("product {0} not found")]
    NotFound(RecordId),

    /// Any other store write failure. Not retried; the operation failed and
    /// must be repeated manually.
    #[error("store write failed: {0}")]
    Store(StoreError),
}

/// Input for creating a product. The display id is not part of the input -
/// it is generated here, independent of the store's record id.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub image: String,
    pub link: Option<String>,
    pub description: String,
}

/// Write-side of the catalog.
///
/// Mutations go straight to the document store; the in-memory cache is NOT
/// updated here. After a successful mutation the caller refreshes the cache
/// so presented state always comes from a full store fetch.
pub struct CatalogMutator<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> CatalogMutator<S> {
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a new product, returning the store-assigned record id.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError`] before any network call if `name` or
    /// `category` trims to empty; [`MutateError::Store`] on write failure.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: NewProduct) -> Result<RecordId, MutateError> {
        validate(&draft.name, &draft.category)?;

        let fields = ProductFields {
            display_id: Some(generate_display_id()),
            name: draft.name,
            category: draft.category,
            image: draft.image,
            link: draft.link,
            description: draft.description,
        };

        let value = serde_json::to_value(&fields).map_err(|e| MutateError::Store(e.into()))?;
        let record_id = self
            .store
            .insert(PRODUCTS_COLLECTION, &value)
            .await
            .map_err(MutateError::Store)?;

        tracing::info!(record_id = %record_id, display_id = ?fields.display_id, "product created");
        Ok(record_id)
    }

    /// Overwrite an existing product's fields wholesale.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError`] locally, [`MutateError::NotFound`] if
    /// the record vanished, [`MutateError::Store`] on any other failure.
    #[instrument(skip(self, fields), fields(record_id = %record_id))]
    pub async fn update(
        &self,
        record_id: &RecordId,
        fields: ProductFields,
    ) -> Result<(), MutateError> {
        validate(&fields.name, &fields.category)?;

        let value = serde_json::to_value(&fields).map_err(|e| MutateError::Store(e.into()))?;
        self.store
            .replace(PRODUCTS_COLLECTION, record_id, &value)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => MutateError::NotFound(record_id.clone()),
                other => MutateError::Store(other),
            })?;

        tracing::info!(record_id = %record_id, "product updated");
        Ok(())
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Fails with [`MutateError::NotFound`] if the record is already gone
    /// (callers treat that as success), [`MutateError::Store`] otherwise.
    #[instrument(skip(self), fields(record_id = %record_id))]
    pub async fn delete(&self, record_id: &RecordId) -> Result<(), MutateError> {
        self.store
            .remove(PRODUCTS_COLLECTION, record_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => MutateError::NotFound(record_id.clone()),
                other => MutateError::Store(other),
            })?;

        tracing::info!(record_id = %record_id, "product deleted");
        Ok(())
    }
}

fn validate(name: &str, category: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if category.trim().is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    Ok(())
}

/// Generate a fresh six-character lowercase alphanumeric display id.
fn generate_display_id() -> DisplayId {
    let mut rng = rand::rng();
    let code: String = (0..DISPLAY_ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..DISPLAY_ID_CHARSET.len());
            char::from(DISPLAY_ID_CHARSET[idx])
        })
        .collect();
    DisplayId::new(code)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::Value as JsonValue;

    use crate::store::Document;

    use super::*;

    /// Store fake that records writes and can be told a record is missing.
    #[derive(Default)]
    struct RecordingStore {
        insert_calls: AtomicUsize,
        inserted: Mutex<Vec<JsonValue>>,
        missing: bool,
    }

    #[async_trait]
    impl DocumentStore for RecordingStore {
        async fn list_all(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
            Ok(vec![])
        }

        async fn insert(&self, _: &str, fields: &JsonValue) -> Result<RecordId, StoreError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            self.inserted.lock().unwrap().push(fields.clone());
            Ok(RecordId::new("rec-new"))
        }

        async fn replace(
            &self,
            collection: &str,
            record_id: &RecordId,
            _: &JsonValue,
        ) -> Result<(), StoreError> {
            if self.missing {
                return Err(StoreError::NotFound(format!("{collection}/{record_id}")));
            }
            Ok(())
        }

        async fn remove(&self, collection: &str, record_id: &RecordId) -> Result<(), StoreError> {
            if self.missing {
                return Err(StoreError::NotFound(format!("{collection}/{record_id}")));
            }
            Ok(())
        }
    }

    fn draft(name: &str, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            category: category.to_owned(),
            ..NewProduct::default()
        }
    }

    #[tokio::test]
    async fn test_create_with_empty_name_never_calls_store() {
        let store = Arc::new(RecordingStore::default());
        let mutator = CatalogMutator::new(store.clone());

        let err = mutator.create(draft("", "Shirts")).await.unwrap_err();
        assert!(matches!(
            err,
            MutateError::Validation(ValidationError::MissingName)
        ));
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);

        // Whitespace-only counts as empty.
        let err = mutator.create(draft("   ", "Shirts")).await.unwrap_err();
        assert!(matches!(
            err,
            MutateError::Validation(ValidationError::MissingName)
        ));
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_with_empty_category_never_calls_store() {
        let store = Arc::new(RecordingStore::default());
        let mutator = CatalogMutator::new(store.clone());

        let err = mutator.create(draft("Oxford Shirt", "")).await.unwrap_err();
        assert!(matches!(
            err,
            MutateError::Validation(ValidationError::MissingCategory)
        ));
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_assigns_generated_display_id() {
        let store = Arc::new(RecordingStore::default());
        let mutator = CatalogMutator::new(store.clone());

        let record_id = mutator.create(draft("Oxford Shirt", "Shirts")).await.unwrap();
        assert_eq!(record_id, RecordId::new("rec-new"));

        let inserted = store.inserted.lock().unwrap();
        let code = inserted[0]["display_id"].as_str().unwrap();
        assert_eq!(code.len(), DISPLAY_ID_LENGTH);
        assert!(code.bytes().all(|b| DISPLAY_ID_CHARSET.contains(&b)));
    }

    #[tokio::test]
    async fn test_update_vanished_record_is_not_found() {
        let store = Arc::new(RecordingStore {
            missing: true,
            ..RecordingStore::default()
        });
        let mutator = CatalogMutator::new(store);

        let fields = ProductFields {
            display_id: Some(DisplayId::new("ab12cd")),
            name: "Oxford Shirt".to_owned(),
            category: "Shirts".to_owned(),
            image: String::new(),
            link: None,
            description: String::new(),
        };

        let err = mutator
            .update(&RecordId::new("gone"), fields)
            .await
            .unwrap_err();
        assert!(matches!(err, MutateError::NotFound(id) if id == RecordId::new("gone")));
    }

    #[tokio::test]
    async fn test_second_delete_surfaces_not_found() {
        let present = Arc::new(RecordingStore::default());
        let mutator = CatalogMutator::new(present);
        mutator.delete(&RecordId::new("rec-1")).await.unwrap();

        let gone = Arc::new(RecordingStore {
            missing: true,
            ..RecordingStore::default()
        });
        let mutator = CatalogMutator::new(gone);
        let err = mutator.delete(&RecordId::new("rec-1")).await.unwrap_err();
        assert!(matches!(err, MutateError::NotFound(_)));
    }

    #[test]
    fn test_display_ids_are_not_constant() {
        let a = generate_display_id();
        let b = generate_display_id();
        let c = generate_display_id();
        // Three draws from a 36^6 space colliding is effectively impossible.
        assert!(!(a == b && b == c));
    }
}
