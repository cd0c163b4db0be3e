//! Remote catalog document store client.
//!
//! # Architecture
//!
//! - The document store is the source of truth for products - NO local
//!   product tables, the in-memory cache is rebuilt from it wholesale
//! - [`DocumentStore`] is the port the catalog layer depends on;
//!   [`HttpDocumentStore`] is the reqwest adapter for the hosted API
//! - Writes are never retried automatically; a failed write is surfaced to
//!   the operator and must be repeated by hand
//!
//! # Contract
//!
//! The store keeps named collections of JSON documents. Every document is a
//! record id (assigned by the store on insert) plus an arbitrary JSON
//! `fields` object. Haberdash uses a single collection, `"products"`.
//!
//! # Example
//!
//! ```rust,ignore
//! use haberdash_web::store::{DocumentStore, HttpDocumentStore};
//!
//! let store = HttpDocumentStore::new(&config.store);
//! let documents = store.list_all("products").await?;
//! ```

mod client;

pub use client::HttpDocumentStore;

use async_trait::async_trait;
use haberdash_core::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// A document as returned by the store: the store-assigned record id plus
/// the stored fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "id")]
    pub record_id: RecordId,
    #[serde(default)]
    pub fields: JsonValue,
}

/// Port for the remote document store.
///
/// Implementations live in infra adapters (the HTTP client below, in-memory
/// fakes in tests) and must not leak transport types into the catalog layer.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in a collection, in the store's stable order.
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Insert a new document and return the store-assigned record id.
    async fn insert(&self, collection: &str, fields: &JsonValue) -> Result<RecordId, StoreError>;

    /// Overwrite the fields of an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] if the record no longer exists.
    async fn replace(
        &self,
        collection: &str,
        record_id: &RecordId,
        fields: &JsonValue,
    ) -> Result<(), StoreError>;

    /// Remove a document.
    ///
    /// Fails with [`StoreError::NotFound`] if the record no longer exists.
    async fn remove(&self, collection: &str, record_id: &RecordId) -> Result<(), StoreError>;
}

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the store.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The store returned a non-success status.
    #[error("store API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound("products/rec-123".to_owned());
        assert_eq!(err.to_string(), "not found: products/rec-123");

        let err = StoreError::RateLimited(60);
        assert_eq!(err.to_string(), "rate limited, retry after 60 seconds");

        let err = StoreError::Api {
            status: 500,
            message: "boom".to_owned(),
        };
        assert_eq!(err.to_string(), "store API error: HTTP 500: boom");
    }

    #[test]
    fn test_document_deserializes_id_field() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "id": "rec-1",
            "fields": {"name": "Oxford Shirt"}
        }))
        .expect("document should parse");

        assert_eq!(doc.record_id, RecordId::new("rec-1"));
        assert_eq!(doc.fields["name"], "Oxford Shirt");
    }
}
