use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{BlobStore, PointerStore};
use crate::domain::DomainError;

/// Blob store backed by a process-local map.
///
/// Returned URLs are the write path behind a `memory://` scheme, so they
/// differ from the nominal path the way a real object store's returned URLs
/// may.
pub struct InMemoryBlobStore {
    objects: Arc<Mutex<HashMap<String, Value>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Drops the object behind `url`, simulating a blob lost out from under
    /// the index. Returns whether anything was removed.
    pub async fn remove(&self, url: &str) -> bool {
        self.objects.lock().await.remove(url).is_some()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn write(&self, path: &str, document: &Value) -> Result<String, DomainError> {
        let url = format!("memory://{}", path);
        self.objects
            .lock()
            .await
            .insert(url.clone(), document.clone());
        debug!("Stored {} in memory", url);
        Ok(url)
    }

    async fn read(&self, url: &str) -> Result<Value, DomainError> {
        self.objects
            .lock()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("No object at {}", url)))
    }
}

/// Pointer store backed by a process-local map.
pub struct InMemoryPointerStore {
    cells: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryPointerStore {
    pub fn new() -> Self {
        Self {
            cells: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryPointerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PointerStore for InMemoryPointerStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cells.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.cells
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
