mod blob_store;
mod pointer_store;

pub use blob_store::*;
pub use pointer_store::*;
