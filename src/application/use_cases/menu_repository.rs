use std::sync::Arc;

use tracing::{info, warn};

use crate::application::use_cases::IndexManager;
use crate::application::{BlobStore, PointerStore};
use crate::domain::{DomainError, HistoryRecord, IdMatch, IndexEntry, MenuDocument, MenuMetadata};

/// Blob path a menu document is written to. The id is caller-supplied.
pub fn menu_path(id: &str) -> String {
    format!("menus/{}.json", id)
}

/// Saves, looks up, and lists menu documents via the index.
///
/// Reads never error: any failure comes back as "nothing found". Writes
/// propagate their failures.
pub struct MenuRepository {
    blob_store: Arc<dyn BlobStore>,
    index: IndexManager,
    id_match: IdMatch,
}

impl MenuRepository {
    pub fn new(blob_store: Arc<dyn BlobStore>, pointer_store: Arc<dyn PointerStore>) -> Self {
        Self {
            index: IndexManager::new(blob_store.clone(), pointer_store),
            blob_store,
            id_match: IdMatch::default(),
        }
    }

    /// Overrides the id-matching policy for [`get_by_id`](Self::get_by_id).
    pub fn with_id_match(mut self, policy: IdMatch) -> Self {
        self.id_match = policy;
        self
    }

    /// Persists a menu and records it in the index. Returns the document's
    /// URL as the blob store reported it.
    ///
    /// There is no rollback: when the index update fails after the document
    /// write succeeded, the blob stays behind, unreachable from the index.
    pub async fn save(&self, id: &str, document: &MenuDocument) -> Result<String, DomainError> {
        let value = serde_json::to_value(document).map_err(|e| {
            DomainError::internal(format!("Failed to serialize menu {}: {}", id, e))
        })?;
        let url = self.blob_store.write(&menu_path(id), &value).await?;

        let mut index = self.index.load().await;
        let metadata = MenuMetadata::from_document(document);
        index.push(IndexEntry {
            id: id.to_string(),
            metadata,
            menu_data_url: url.clone(),
        });

        if let Err(e) = self.index.persist(&index).await {
            warn!(
                "Menu {} was written to {} but the index update failed; the blob is orphaned",
                id, url
            );
            return Err(e);
        }

        info!("Saved menu {} ({} menus indexed)", id, index.len());
        Ok(url)
    }

    /// Fetches a menu by id. Every failure reads as `None`, including an
    /// index entry that carries no stored URL; this path never errors.
    pub async fn get_by_id(&self, id: &str) -> Option<MenuDocument> {
        let index = self.index.load().await;
        if index.is_empty() {
            return None;
        }

        let entry = index.find(id, self.id_match)?;
        if entry.menu_data_url.is_empty() {
            warn!("Index entry {} has no stored URL", entry.id);
            return None;
        }

        let value = match self.blob_store.read(&entry.menu_data_url).await {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Failed to fetch menu {} from {}: {}",
                    entry.id, entry.menu_data_url, e
                );
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(
                    "Menu document at {} did not parse: {}",
                    entry.menu_data_url, e
                );
                None
            }
        }
    }

    /// Lists every indexed menu, most recent first. Empty on any failure.
    pub async fn list_history(&self) -> Vec<HistoryRecord> {
        let index = self.index.load().await;

        let mut records: Vec<HistoryRecord> = index
            .menus
            .iter()
            .map(|entry| HistoryRecord::new(&entry.id, &entry.metadata))
            .collect();

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }
}
