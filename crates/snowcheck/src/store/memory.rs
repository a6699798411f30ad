//! In-process document store

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::{DocumentStore, document_id};
use crate::errors::{StoreError, StoreResult};

/// Document store backed by a map keyed by `(partition_key, id)`.
///
/// Same conflict / not-found behavior as the Cosmos DB store. Contents are
/// lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
  docs: RwLock<HashMap<(String, String), Value>>,
}

impl MemoryStore {
  /// Creates an empty store.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored documents.
  pub fn len(&self) -> usize {
    self.docs.read().len()
  }

  /// `true` if nothing has been stored.
  pub fn is_empty(&self) -> bool {
    self.docs.read().is_empty()
  }

  /// All documents in a partition (unordered).
  pub fn documents_in(&self, partition_key: &str) -> Vec<Value> {
    self
      .docs
      .read()
      .iter()
      .filter(|((pk, _), _)| pk == partition_key)
      .map(|(_, doc)| doc.clone())
      .collect()
  }
}

#[async_trait]
impl DocumentStore for MemoryStore {
  async fn create(&self, partition_key: &str, document: Value) -> StoreResult<()> {
    let id = document_id(&document)?.to_string();
    match self.docs.write().entry((partition_key.to_string(), id)) {
      Entry::Occupied(entry) => Err(StoreError::AlreadyExists {
        id: entry.key().1.clone(),
        partition_key: partition_key.to_string(),
      }),
      Entry::Vacant(entry) => {
        entry.insert(document);
        Ok(())
      }
    }
  }

  async fn read(&self, id: &str, partition_key: &str) -> StoreResult<Value> {
    self
      .docs
      .read()
      .get(&(partition_key.to_string(), id.to_string()))
      .cloned()
      .ok_or_else(|| StoreError::NotFound {
        id: id.to_string(),
        partition_key: partition_key.to_string(),
      })
  }
}
