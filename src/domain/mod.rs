//! # Domain Layer
//!
//! Core models and the crate-wide error type.
//! This layer is independent of external frameworks and infrastructure.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
