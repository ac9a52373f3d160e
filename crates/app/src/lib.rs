//! # wefield-app
//!
//! Application layer — the field-service store and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** adapters must implement:
//!   - `DocumentStore` — read/replace the single persisted store document
//! - Provide the **driving** side as one explicit store object:
//!   - `FieldServiceStore` — load, persist, create records, job lifecycle,
//!     inventory adjustment, queries, export/import
//! - Provide **in-process infrastructure** that needs no IO (`InMemoryDocumentStore`)
//! - Enforce cross-entity rules (technician status follows jobs, inventory is
//!   deducted once per completion) without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `wefield-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod memory_store;
pub mod ports;
pub mod store;

pub use store::FieldServiceStore;
