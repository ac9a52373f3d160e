//! # wefield-adapter-storage-file
//!
//! File persistence adapter: one storage key maps to one `<key>.json` file.
//!
//! ## Responsibilities
//! - Implement the `DocumentStore` port defined in `wefield-app::ports::storage`
//! - Create the data directory on startup
//! - Replace the document atomically (temp file, fsync, rename) so a crash
//!   mid-write never leaves a truncated store behind
//!
//! ## Dependency rule
//! Depends on `wefield-app` (for the port trait) and `wefield-domain` (for errors).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod file_store;

pub use error::StorageError;
pub use file_store::{Config, FileDocumentStore, write_atomically};
