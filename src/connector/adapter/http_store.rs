use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::application::{BlobStore, PointerStore};
use crate::domain::DomainError;

/// Base URL of the remote JSON object store.
pub const BLOB_BASE_URL_VAR: &str = "MENUBANK_BLOB_BASE_URL";
/// Base URL of the remote pointer cell endpoint.
pub const POINTER_BASE_URL_VAR: &str = "MENUBANK_POINTER_BASE_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Deserialize)]
struct WriteResponse {
    url: Option<String>,
}

/// Blob store speaking plain JSON over HTTP:
///
/// - `PUT {base}/{path}` with the document as the body stores it. The store
///   replies `{"url": "..."}` naming the canonical URL of the object; a
///   reply without one falls back to the request URL.
/// - `GET {url}` returns the document; 404 maps to not-found.
///
/// Configure via environment:
///
/// ```text
/// MENUBANK_BLOB_BASE_URL=https://storage.example.com/v1
/// ```
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Result<Self, DomainError> {
        let base = std::env::var(BLOB_BASE_URL_VAR)
            .map_err(|_| DomainError::invalid_input(format!("{} is not set", BLOB_BASE_URL_VAR)))?;
        Ok(Self::new(base))
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn write(&self, path: &str, document: &Value) -> Result<String, DomainError> {
        let request_url = join_url(&self.base_url, path);
        let response = self
            .client
            .put(&request_url)
            .json(document)
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("PUT {} failed: {}", request_url, e)))?
            .error_for_status()
            .map_err(|e| DomainError::storage(format!("PUT {} failed: {}", request_url, e)))?;

        // The store's reply carries the canonical URL; it wins over the
        // request URL when present.
        let canonical = response
            .json::<WriteResponse>()
            .await
            .ok()
            .and_then(|r| r.url);
        Ok(canonical.unwrap_or(request_url))
    }

    async fn read(&self, url: &str) -> Result<Value, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("GET {} failed: {}", url, e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::not_found(format!("No document at {}", url)));
        }
        let response = response
            .error_for_status()
            .map_err(|e| DomainError::storage(format!("GET {} failed: {}", url, e)))?;

        response
            .json()
            .await
            .map_err(|e| DomainError::parse(format!("Document at {} did not parse: {}", url, e)))
    }
}

/// Pointer store against a key-value HTTP endpoint:
/// `GET {base}/{key}` returns the raw value (404 when unset);
/// `PUT {base}/{key}` with the value as the body sets it.
///
/// Configure via environment:
///
/// ```text
/// MENUBANK_POINTER_BASE_URL=https://kv.example.com/menubank
/// ```
pub struct HttpPointerStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPointerStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Result<Self, DomainError> {
        let base = std::env::var(POINTER_BASE_URL_VAR).map_err(|_| {
            DomainError::invalid_input(format!("{} is not set", POINTER_BASE_URL_VAR))
        })?;
        Ok(Self::new(base))
    }
}

#[async_trait]
impl PointerStore for HttpPointerStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let url = join_url(&self.base_url, key);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("GET {} failed: {}", url, e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|e| DomainError::storage(format!("GET {} failed: {}", url, e)))?;

        let value = response
            .text()
            .await
            .map_err(|e| DomainError::storage(format!("GET {} failed: {}", url, e)))?;

        // Some stores hand the value back as a JSON string literal.
        let trimmed = value.trim().trim_matches('"').to_string();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed))
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let url = join_url(&self.base_url, key);
        self.client
            .put(&url)
            .body(value.to_string())
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("PUT {} failed: {}", url, e)))?
            .error_for_status()
            .map_err(|e| DomainError::storage(format!("PUT {} failed: {}", url, e)))?;
        Ok(())
    }
}
