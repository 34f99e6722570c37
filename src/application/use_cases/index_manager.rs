use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{BlobStore, PointerStore};
use crate::domain::{DomainError, MenuIndex};

/// Blob path the index document is written to on every persist.
pub const INDEX_PATH: &str = "menus/index.json";
/// The one pointer-store key in use: the current index document's URL.
pub const INDEX_POINTER_KEY: &str = "menu_index_url";

/// Reads and writes the menu index, keeping the pointer cell in sync with
/// the latest index blob.
///
/// The index is a denormalized cache of everything listing and search need
/// without fetching full documents; keeping it as one document trades O(1)
/// fetch for a full-index rewrite per insert.
pub struct IndexManager {
    blob_store: Arc<dyn BlobStore>,
    pointer_store: Arc<dyn PointerStore>,
}

impl IndexManager {
    pub fn new(blob_store: Arc<dyn BlobStore>, pointer_store: Arc<dyn PointerStore>) -> Self {
        Self {
            blob_store,
            pointer_store,
        }
    }

    /// Loads the current index, degrading every failure (including an
    /// unset pointer) to an empty index; this path never errors.
    pub async fn load(&self) -> MenuIndex {
        let url = match self.pointer_store.get(INDEX_POINTER_KEY).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!("Index pointer not set; treating the index as empty");
                return MenuIndex::default();
            }
            Err(e) => {
                warn!("Failed to read the index pointer: {}", e);
                return MenuIndex::default();
            }
        };

        let value = match self.blob_store.read(&url).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to fetch the index from {}: {}", url, e);
                return MenuIndex::default();
            }
        };

        match serde_json::from_value(value) {
            Ok(index) => index,
            Err(e) => {
                warn!("Index document at {} did not parse: {}", url, e);
                MenuIndex::default()
            }
        }
    }

    /// Writes the index document to [`INDEX_PATH`] and republishes its URL
    /// to the pointer cell. Unlike [`load`](Self::load), failures propagate:
    /// a failed index write must never look like success to the caller.
    /// Returns the published URL.
    pub async fn persist(&self, index: &MenuIndex) -> Result<String, DomainError> {
        let value = serde_json::to_value(index)
            .map_err(|e| DomainError::internal(format!("Failed to serialize the index: {}", e)))?;

        let url = self.blob_store.write(INDEX_PATH, &value).await?;
        self.pointer_store.set(INDEX_POINTER_KEY, &url).await?;

        debug!("Published index ({} menus) at {}", index.len(), url);
        Ok(url)
    }
}
