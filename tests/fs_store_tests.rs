//! Filesystem adapter tests.

use std::sync::Arc;

use menubank::{
    BlobStore, FsBlobStore, FsPointerStore, MenuDocument, MenuIndex, MenuRepository, PointerStore,
    INDEX_POINTER_KEY,
};
use tempfile::TempDir;

fn sample_menu(title: &str) -> MenuDocument {
    MenuDocument {
        title: Some(title.to_string()),
        duration: Some(40.0),
        total_time: Some(40.0),
        ..Default::default()
    }
}

#[tokio::test]
async fn documents_round_trip_through_the_filesystem() {
    let dir = TempDir::new().unwrap();
    let repo = MenuRepository::new(
        Arc::new(FsBlobStore::new(dir.path())),
        Arc::new(FsPointerStore::new(dir.path())),
    );

    let menu = sample_menu("Lap Work");
    let url = repo.save("fs-1", &menu).await.unwrap();
    assert!(url.starts_with("file://"));

    let fetched = repo.get_by_id("fs-1").await.expect("menu not found");
    assert_eq!(fetched, menu);
}

#[tokio::test]
async fn every_save_republishes_the_pointer() {
    let dir = TempDir::new().unwrap();
    let blob = Arc::new(FsBlobStore::new(dir.path()));
    let pointer = Arc::new(FsPointerStore::new(dir.path()));
    let repo = MenuRepository::new(blob.clone(), pointer.clone());

    repo.save("fs-1", &sample_menu("First")).await.unwrap();
    repo.save("fs-2", &sample_menu("Second")).await.unwrap();

    let url = pointer
        .get(INDEX_POINTER_KEY)
        .await
        .unwrap()
        .expect("pointer not set");

    let index: MenuIndex = serde_json::from_value(blob.read(&url).await.unwrap()).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.menus[0].id, "fs-1");
    assert_eq!(index.menus[1].id, "fs-2");
}

#[tokio::test]
async fn missing_pointer_reads_as_unset() {
    let dir = TempDir::new().unwrap();
    let pointer = FsPointerStore::new(dir.path());

    assert_eq!(pointer.get(INDEX_POINTER_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn missing_blob_reads_as_not_found() {
    let dir = TempDir::new().unwrap();
    let blob = FsBlobStore::new(dir.path());

    let err = blob
        .read(&format!("file://{}/nope.json", dir.path().display()))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unparseable_blob_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let blob = FsBlobStore::new(dir.path());

    let target = dir.path().join("broken.json");
    std::fs::write(&target, "not json").unwrap();

    let err = blob
        .read(&format!("file://{}", target.display()))
        .await
        .unwrap_err();
    assert!(matches!(err, menubank::DomainError::ParseError(_)));
}
