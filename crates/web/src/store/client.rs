//! HTTP adapter for the catalog document store.
//!
//! Plain JSON-over-REST with `reqwest`:
//!
//! ```text
//! GET    {base}/v1/collections/{collection}/documents        - list
//! POST   {base}/v1/collections/{collection}/documents        - insert
//! PUT    {base}/v1/collections/{collection}/documents/{id}   - replace
//! DELETE {base}/v1/collections/{collection}/documents/{id}   - remove
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use haberdash_core::RecordId;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::config::StoreConfig;

use super::{Document, DocumentStore, StoreError};

/// Client for the catalog document store API.
#[derive(Clone)]
pub struct HttpDocumentStore {
    inner: Arc<HttpDocumentStoreInner>,
}

struct HttpDocumentStoreInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Response body for a document listing.
#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    documents: Vec<Document>,
}

/// Response body for an insert.
#[derive(Debug, Deserialize)]
struct InsertResponse {
    id: RecordId,
}

impl HttpDocumentStore {
    /// Create a new document store client.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            inner: Arc::new(HttpDocumentStoreInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                api_key: config.api_key.expose_secret().to_owned(),
            }),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/collections/{collection}/documents", self.inner.base_url)
    }

    fn document_url(&self, collection: &str, record_id: &RecordId) -> String {
        format!(
            "{}/v1/collections/{collection}/documents/{record_id}",
            self.inner.base_url
        )
    }

    /// Check a response for transport-level failure and return the body text.
    ///
    /// `context` identifies the resource for `NotFound` errors.
    async fn read_response(
        response: reqwest::Response,
        context: &str,
    ) -> Result<String, StoreError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(StoreError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(context.to_owned()));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "catalog store returned non-success status"
            );
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    #[instrument(skip(self), fields(collection = %collection))]
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let response = self
            .inner
            .client
            .get(self.collection_url(collection))
            .bearer_auth(&self.inner.api_key)
            .send()
            .await?;

        let body = Self::read_response(response, collection).await?;
        let listing: ListDocumentsResponse = serde_json::from_str(&body)?;

        tracing::debug!(count = listing.documents.len(), "listed documents");
        Ok(listing.documents)
    }

    #[instrument(skip(self, fields), fields(collection = %collection))]
    async fn insert(&self, collection: &str, fields: &JsonValue) -> Result<RecordId, StoreError> {
        let response = self
            .inner
            .client
            .post(self.collection_url(collection))
            .bearer_auth(&self.inner.api_key)
            .json(&serde_json::json!({ "fields": fields }))
            .send()
            .await?;

        let body = Self::read_response(response, collection).await?;
        let created: InsertResponse = serde_json::from_str(&body)?;

        tracing::debug!(record_id = %created.id, "inserted document");
        Ok(created.id)
    }

    #[instrument(skip(self, fields), fields(collection = %collection, record_id = %record_id))]
    async fn replace(
        &self,
        collection: &str,
        record_id: &RecordId,
        fields: &JsonValue,
    ) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .put(self.document_url(collection, record_id))
            .bearer_auth(&self.inner.api_key)
            .json(&serde_json::json!({ "fields": fields }))
            .send()
            .await?;

        let context = format!("{collection}/{record_id}");
        Self::read_response(response, &context).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %collection, record_id = %record_id))]
    async fn remove(&self, collection: &str, record_id: &RecordId) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .delete(self.document_url(collection, record_id))
            .bearer_auth(&self.inner.api_key)
            .send()
            .await?;

        let context = format!("{collection}/{record_id}");
        Self::read_response(response, &context).await?;
        Ok(())
    }
}
