use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

/// Bulk JSON document storage.
///
/// Documents are addressed by path on write; every write returns the URL
/// the document can be fetched back from. The returned URL is authoritative
/// and opaque: it may differ from the nominal path and must be stored
/// verbatim.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn write(&self, path: &str, document: &Value) -> Result<String, DomainError>;

    async fn read(&self, url: &str) -> Result<Value, DomainError>;
}
