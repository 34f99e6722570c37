use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::application::{BlobStore, PointerStore};
use crate::domain::DomainError;

const FILE_SCHEME: &str = "file://";

/// Blob store writing pretty-printed JSON files under a root directory.
/// Returned URLs carry a `file://` scheme in front of the target path.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn write(&self, path: &str, document: &Value) -> Result<String, DomainError> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_string_pretty(document)
            .map_err(|e| DomainError::internal(format!("Failed to serialize {}: {}", path, e)))?;
        fs::write(&target, body).await?;

        let url = format!("{}{}", FILE_SCHEME, target.display());
        debug!("Wrote {}", url);
        Ok(url)
    }

    async fn read(&self, url: &str) -> Result<Value, DomainError> {
        let path = url.strip_prefix(FILE_SCHEME).unwrap_or(url);
        let body = match fs::read_to_string(Path::new(path)).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::not_found(format!("No document at {}", url)));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&body)
            .map_err(|e| DomainError::parse(format!("Document at {} did not parse: {}", url, e)))
    }
}

/// Pointer store persisting one file per key under a root directory.
pub struct FsPointerStore {
    root: PathBuf,
}

impl FsPointerStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn cell_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.ptr", key))
    }
}

#[async_trait]
impl PointerStore for FsPointerStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        match fs::read_to_string(self.cell_path(key)).await {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        fs::create_dir_all(&self.root).await?;
        fs::write(self.cell_path(key), value).await?;
        Ok(())
    }
}
