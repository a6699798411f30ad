//! Cosmos DB (SQL API) REST client

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::auth::{master_key_token, rfc1123_date};
use super::{DocumentStore, document_id};
use crate::config::StoreSettings;
use crate::errors::{StoreError, StoreResult};

/// REST API version sent in `x-ms-version`.
const API_VERSION: &str = "2018-12-31";

/// Resource type of documents in the signed payload.
const RESOURCE_DOCS: &str = "docs";

/// Cosmos DB container accessed through its REST API.
///
/// Built once at startup and shared by all requests. Missing endpoint or key
/// does not fail construction; every operation then fails with
/// [`StoreError::Misconfigured`].
#[derive(Debug, Clone)]
pub struct CosmosStore {
  http: Client,
  settings: StoreSettings,
}

impl CosmosStore {
  /// Creates the store client.
  ///
  /// # Errors
  /// Returns an error if the HTTP client cannot be built.
  pub fn new(settings: StoreSettings) -> StoreResult<Self> {
    if settings.endpoint.is_none() || settings.key.is_none() {
      warn!("COSMOS_ENDPOINT / COSMOS_KEY が未設定です。ストア操作は失敗します");
    }
    let http = Client::builder().build()?;
    Ok(Self { http, settings })
  }

  /// Connection settings in use.
  pub fn settings(&self) -> &StoreSettings {
    &self.settings
  }

  fn credentials(&self) -> StoreResult<(&str, &str)> {
    let endpoint = self
      .settings
      .endpoint
      .as_deref()
      .filter(|s| !s.is_empty())
      .ok_or_else(|| StoreError::Misconfigured("COSMOS_ENDPOINT is not set".to_string()))?;
    let key = self
      .settings
      .key
      .as_deref()
      .filter(|s| !s.is_empty())
      .ok_or_else(|| StoreError::Misconfigured("COSMOS_KEY is not set".to_string()))?;
    Ok((endpoint.trim_end_matches('/'), key))
  }

  fn collection_link(&self) -> String {
    format!(
      "dbs/{}/colls/{}",
      self.settings.database, self.settings.container
    )
  }

  /// Builds a signed request. `resource_link` is signed as-is; `path` is
  /// the URL path (with the id percent-encoded where present).
  fn request(
    &self,
    method: Method,
    path: &str,
    resource_link: &str,
    partition_key: &str,
  ) -> StoreResult<RequestBuilder> {
    let (endpoint, key) = self.credentials()?;
    let date = rfc1123_date(Utc::now());
    let token = master_key_token(method.as_str(), RESOURCE_DOCS, resource_link, &date, key)?;
    let partition_header = serde_json::to_string(&[partition_key])
      .map_err(|e| StoreError::other(format!("partition key encoding failed: {e}")))?;

    Ok(
      self
        .http
        .request(method, format!("{endpoint}/{path}"))
        .header("authorization", token)
        .header("x-ms-date", date)
        .header("x-ms-version", API_VERSION)
        .header("x-ms-documentdb-partitionkey", partition_header),
    )
  }
}

#[async_trait]
impl DocumentStore for CosmosStore {
  async fn create(&self, partition_key: &str, document: Value) -> StoreResult<()> {
    let id = document_id(&document)?.to_string();
    let link = self.collection_link();
    let path = format!("{link}/docs");

    debug!(id = %id, pk = %partition_key, "Cosmos DB create");

    let res = self
      .request(Method::POST, &path, &link, partition_key)?
      .json(&document)
      .send()
      .await?;

    let status = res.status();
    if status.is_success() {
      return Ok(());
    }
    if status == StatusCode::CONFLICT {
      return Err(StoreError::AlreadyExists {
        id,
        partition_key: partition_key.to_string(),
      });
    }
    let body = res.text().await.unwrap_or_default();
    Err(StoreError::other(format!("({status}) {body}")))
  }

  async fn read(&self, id: &str, partition_key: &str) -> StoreResult<Value> {
    let collection = self.collection_link();
    let link = format!("{collection}/docs/{id}");
    let path = format!("{collection}/docs/{}", urlencoding::encode(id));

    debug!(id = %id, pk = %partition_key, "Cosmos DB read");

    let res = self.request(Method::GET, &path, &link, partition_key)?.send().await?;

    let status = res.status();
    if status == StatusCode::NOT_FOUND {
      return Err(StoreError::NotFound {
        id: id.to_string(),
        partition_key: partition_key.to_string(),
      });
    }
    let body = res.text().await?;
    if !status.is_success() {
      return Err(StoreError::other(format!("({status}) {body}")));
    }
    serde_json::from_str(&body)
      .map_err(|e| StoreError::other(format!("stored document is not valid JSON: {e}")))
  }
}
