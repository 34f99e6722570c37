mod index;
mod load_level;
mod menu;
mod menu_match;
mod metadata;

pub use index::*;
pub use load_level::*;
pub use menu::*;
pub use menu_match::*;
pub use metadata::*;
