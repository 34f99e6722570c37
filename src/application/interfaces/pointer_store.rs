use async_trait::async_trait;

use crate::domain::DomainError;

/// A small key-value store. The crate uses exactly one cell: the current
/// index document's URL.
#[async_trait]
pub trait PointerStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
