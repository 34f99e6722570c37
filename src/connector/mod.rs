//! # Connector Layer
//!
//! Store implementations behind the application-layer contracts:
//! - In-memory (tests, smoke runs)
//! - Filesystem (the CLI's default backend)
//! - HTTP (remote object store and pointer cell)

pub mod adapter;

pub use adapter::*;
