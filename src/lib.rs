pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    BlobStore, IndexManager, MenuRepository, PointerStore, SimilaritySearchEngine, INDEX_PATH,
    INDEX_POINTER_KEY,
};

pub use connector::{
    FsBlobStore, FsPointerStore, HttpBlobStore, HttpPointerStore, InMemoryBlobStore,
    InMemoryPointerStore,
};

pub use domain::{
    DomainError, HistoryRecord, IdMatch, IndexEntry, LoadLevel, MenuDocument, MenuIndex, MenuItem,
    MenuMatch, MenuMetadata, MenuSection, Rest,
};
