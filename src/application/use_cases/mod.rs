mod index_manager;
mod menu_repository;
mod similarity_search;

pub use index_manager::*;
pub use menu_repository::*;
pub use similarity_search::*;
