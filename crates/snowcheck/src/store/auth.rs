//! Cosmos DB master-key authorization

use base64::{Engine, engine::general_purpose};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::{StoreError, StoreResult};

/// Builds the `authorization` header value for a Cosmos DB REST call.
///
/// The signed payload is `verb\nresource_type\nresource_link\ndate\n\n` with
/// verb, resource type and date lowercased. `resource_link` is case sensitive
/// and must not start with a slash.
///
/// # Errors
/// Returns [`StoreError::Misconfigured`] if `key` is not valid base64.
pub fn master_key_token(
  verb: &str,
  resource_type: &str,
  resource_link: &str,
  date: &str,
  key: &str,
) -> StoreResult<String> {
  let key_bytes = general_purpose::STANDARD
    .decode(key.trim())
    .map_err(|e| StoreError::Misconfigured(format!("COSMOS_KEY is not valid base64: {e}")))?;

  let payload = format!(
    "{}\n{}\n{}\n{}\n\n",
    verb.to_lowercase(),
    resource_type.to_lowercase(),
    resource_link,
    date.to_lowercase()
  );

  let mut mac = Hmac::<Sha256>::new_from_slice(&key_bytes)
    .map_err(|e| StoreError::Misconfigured(format!("COSMOS_KEY cannot be used: {e}")))?;
  mac.update(payload.as_bytes());
  let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

  Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={signature}")).into_owned())
}

/// Formats a timestamp as required by the `x-ms-date` header.
#[must_use]
pub fn rfc1123_date(at: DateTime<Utc>) -> String {
  at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
