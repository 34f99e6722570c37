mod fs_store;
mod http_store;
mod memory_store;

pub use fs_store::*;
pub use http_store::*;
pub use memory_store::*;
