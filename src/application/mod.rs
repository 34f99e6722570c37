//! # Application Layer
//!
//! Store contracts and the use cases coordinating them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
