//! Category registry: the label set behind the category dropdowns.
//!
//! Categories are plain string labels, persisted locally (not in the
//! document store) and owned exclusively by this registry. The list keeps
//! insertion order for display and permits duplicates; removal strips every
//! matching entry. Deleting a category never cascades to products - records
//! keep whatever label they were created with.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::db::RepositoryError;

/// Settings key the category list is persisted under.
pub const CATEGORIES_KEY: &str = "categories";

/// Labels seeded on first load, before the operator has defined any.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Shirts", "Shoes", "Trousers"];

/// Port for key/value settings persistence.
///
/// The production implementation is the Postgres `settings` table; tests
/// use an in-memory map. Keeping the registry behind this port means no
/// ambient storage access - whoever constructs the registry decides where
/// its state lives.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, RepositoryError>;
    async fn set(&self, key: &str, value: &JsonValue) -> Result<(), RepositoryError>;
}

/// The category label set, read-through to its settings port.
///
/// Every mutation persists synchronously before returning; there is no
/// batching and no in-memory master copy, so two registry instances over
/// the same store always agree.
pub struct CategoryRegistry<S> {
    settings: S,
}

impl<S: SettingsStore> CategoryRegistry<S> {
    pub const fn new(settings: S) -> Self {
        Self { settings }
    }

    /// Load the persisted category list.
    ///
    /// If nothing has ever been persisted, seeds the default labels and
    /// writes the seed immediately, so repeated loads are idempotent. An
    /// explicitly emptied list stays empty - only an absent key seeds, so a
    /// removed label can never reappear through reseeding.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings read/write fails or the stored
    /// value is not a string list.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<String>, RepositoryError> {
        match self.settings.get(CATEGORIES_KEY).await? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                RepositoryError::DataCorruption(format!("categories setting: {e}"))
            }),
            None => self.seed().await,
        }
    }

    /// Append a label (duplicates permitted) and persist.
    ///
    /// A label that trims to empty is a no-op: nothing is appended and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    #[instrument(skip(self), fields(label = %label))]
    pub async fn add(&self, label: &str) -> Result<Vec<String>, RepositoryError> {
        let label = label.trim();
        if label.is_empty() {
            return self.load().await;
        }

        let mut categories = self.load().await?;
        categories.push(label.to_owned());
        self.persist(&categories).await?;
        Ok(categories)
    }

    /// Remove every entry equal to `label` and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    #[instrument(skip(self), fields(label = %label))]
    pub async fn remove(&self, label: &str) -> Result<Vec<String>, RepositoryError> {
        let mut categories = self.load().await?;
        categories.retain(|c| c != label);
        self.persist(&categories).await?;
        Ok(categories)
    }

    async fn seed(&self) -> Result<Vec<String>, RepositoryError> {
        let defaults: Vec<String> = DEFAULT_CATEGORIES.iter().map(|&c| c.to_owned()).collect();
        self.persist(&defaults).await?;
        tracing::info!("seeded default categories");
        Ok(defaults)
    }

    async fn persist(&self, categories: &[String]) -> Result<(), RepositoryError> {
        let value = serde_json::json!(categories);
        self.settings.set(CATEGORIES_KEY, &value).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// In-memory settings store for tests.
    #[derive(Default)]
    struct MemorySettings {
        data: Mutex<HashMap<String, JsonValue>>,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl SettingsStore for Arc<MemorySettings> {
        async fn get(&self, key: &str) -> Result<Option<JsonValue>, RepositoryError> {
            Ok(self.data.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &JsonValue) -> Result<(), RepositoryError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.data.lock().unwrap().insert(key.to_owned(), value.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl SettingsStore for &MemorySettings {
        async fn get(&self, key: &str) -> Result<Option<JsonValue>, RepositoryError> {
            Ok(self.data.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &JsonValue) -> Result<(), RepositoryError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.data.lock().unwrap().insert(key.to_owned(), value.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_first_load_seeds_defaults_and_persists_once() {
        let store = Arc::new(MemorySettings::default());
        let registry = CategoryRegistry::new(Arc::clone(&store));

        let first = registry.load().await.unwrap();
        assert_eq!(first, ["Shirts", "Shoes", "Trousers"]);
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);

        // Seeding already persisted, so the second load is a pure read.
        let second = registry.load().await.unwrap();
        assert_eq!(second, first);
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_add_round_trips_through_a_fresh_instance() {
        let store = Arc::new(MemorySettings::default());
        let registry = CategoryRegistry::new(Arc::clone(&store));
        let before = registry.load().await.unwrap();

        registry.add("Jackets").await.unwrap();

        let fresh = CategoryRegistry::new(Arc::clone(&store));
        let after = fresh.load().await.unwrap();
        assert_eq!(
            after.iter().filter(|c| *c == "Jackets").count(),
            before.iter().filter(|c| *c == "Jackets").count() + 1
        );
    }

    #[tokio::test]
    async fn test_add_trims_and_permits_duplicates() {
        let store = Arc::new(MemorySettings::default());
        let registry = CategoryRegistry::new(Arc::clone(&store));

        registry.add("  Jackets ").await.unwrap();
        let list = registry.add("Jackets").await.unwrap();

        assert_eq!(list.iter().filter(|c| *c == "Jackets").count(), 2);
    }

    #[tokio::test]
    async fn test_add_blank_label_is_a_noop() {
        let store = Arc::new(MemorySettings::default());
        let registry = CategoryRegistry::new(Arc::clone(&store));
        registry.load().await.unwrap();
        let writes_after_seed = store.writes.load(Ordering::SeqCst);

        let list = registry.add("   ").await.unwrap();

        assert_eq!(list, ["Shirts", "Shoes", "Trousers"]);
        assert_eq!(store.writes.load(Ordering::SeqCst), writes_after_seed);
    }

    #[tokio::test]
    async fn test_remove_strips_every_occurrence() {
        let store = Arc::new(MemorySettings::default());
        let registry = CategoryRegistry::new(Arc::clone(&store));
        registry.add("Jackets").await.unwrap();
        registry.add("Jackets").await.unwrap();

        let list = registry.remove("Jackets").await.unwrap();
        assert!(!list.contains(&"Jackets".to_owned()));

        let reloaded = registry.load().await.unwrap();
        assert!(!reloaded.contains(&"Jackets".to_owned()));
    }

    #[tokio::test]
    async fn test_removed_default_does_not_reappear_via_reseed() {
        let store = Arc::new(MemorySettings::default());
        let registry = CategoryRegistry::new(Arc::clone(&store));

        registry.remove("Shirts").await.unwrap();
        registry.remove("Shoes").await.unwrap();
        let list = registry.remove("Trousers").await.unwrap();
        assert!(list.is_empty());

        // The key exists (as an empty list), so no reseeding happens.
        let reloaded = registry.load().await.unwrap();
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_value_is_surfaced() {
        let store = MemorySettings::default();
        store
            .data
            .lock()
            .unwrap()
            .insert(CATEGORIES_KEY.to_owned(), serde_json::json!("not-a-list"));

        let registry = CategoryRegistry::new(&store);
        let err = registry.load().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
