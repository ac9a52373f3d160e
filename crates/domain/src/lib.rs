//! # wefield-domain
//!
//! Pure domain model for the wefield field-service tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Customers** (people and addresses jobs are performed for)
//! - Define **Jobs** (a dated visit with urgency, status, parts used, photos)
//! - Define **Inventory items** (parts stocked at a site or van)
//! - Define **Technicians** (field staff whose status follows their jobs)
//! - Define **Equipment** (installed units, searchable by model and serial)
//! - Define the **Snapshot** — the whole store as one persisted document
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod customer;
pub mod equipment;
pub mod inventory;
pub mod job;
pub mod photo;
pub mod snapshot;
pub mod technician;
