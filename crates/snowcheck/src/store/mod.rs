//! Document store: point writes and reads keyed by id + partition key.

mod auth;
mod cosmos;
mod memory;

use async_trait::async_trait;
use serde_json::Value;

pub use auth::{master_key_token, rfc1123_date};
pub use cosmos::CosmosStore;
pub use memory::MemoryStore;

use crate::errors::{StoreError, StoreResult};

/// Key/partition-addressed JSON document store.
///
/// No queries, no listing, no updates: documents are created once and read
/// back by `(id, partition_key)`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Creates `document` in `partition_key`. The document must carry a string `id`.
  ///
  /// # Errors
  /// - [`StoreError::AlreadyExists`] if the id is taken in that partition
  /// - [`StoreError::Misconfigured`] if the store has no connection settings
  /// - [`StoreError::Other`] for anything else
  async fn create(&self, partition_key: &str, document: Value) -> StoreResult<()>;

  /// Reads the document stored under `(id, partition_key)`.
  ///
  /// # Errors
  /// - [`StoreError::NotFound`] if there is no such document
  /// - [`StoreError::Misconfigured`] if the store has no connection settings
  /// - [`StoreError::Other`] for anything else
  async fn read(&self, id: &str, partition_key: &str) -> StoreResult<Value>;
}

/// Returns the `id` field of a document about to be created.
///
/// # Errors
/// Returns [`StoreError::InvalidDocument`] if the document is not an object or
/// has no string `id`.
pub fn document_id(document: &Value) -> StoreResult<&str> {
  document
    .as_object()
    .ok_or_else(|| StoreError::InvalidDocument("document must be a JSON object".to_string()))?
    .get("id")
    .and_then(Value::as_str)
    .ok_or_else(|| StoreError::InvalidDocument("document has no string `id`".to_string()))
}
